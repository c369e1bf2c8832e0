//! Single-query evaluation with the whole row stage in one 16-wide pass
//!
//! Lanes `4 * i .. 4 * i + 4` of the wide vector hold stencil row `i`,
//! each as `{x, y, z, pad}`. After the row pass the vector is split back
//! into four 4-wide row results for the final pass along axis A.

use wide::{f32x16, f32x4};

use crate::cubic::{spline3, LaneArray};
use crate::gather::stencil_records;
use crate::grid::Grid;
use crate::position::resolve;
use crate::{Point2, Point3};

/// Column `j` of the stencil, all four rows side by side
#[inline(always)]
fn column(rows: &[[[f32; 4]; 4]; 4], j: usize) -> f32x16 {
    let mut lanes = [0.0f32; 16];
    for (i, chunk) in lanes.chunks_exact_mut(4).enumerate() {
        chunk.copy_from_slice(&rows[i][j]);
    }
    f32x16::from_lanes(lanes)
}

/// Narrow a 16-wide vector to its `i`-th group of four lanes
#[inline(always)]
fn quarter(v: &[f32; 16], i: usize) -> f32x4 {
    f32x4::from_lanes([v[4 * i], v[4 * i + 1], v[4 * i + 2], v[4 * i + 3]])
}

/// Evaluate the surface at `ab` with one 16-wide and one 4-wide spline pass
#[inline]
pub fn evaluate_vec16(grid: &Grid, ab: Point2) -> Point3 {
    let cell = resolve(grid, ab);
    let rows = stencil_records(grid.samples(), cell.index, grid.count_b());

    let v0123 = spline3(
        column(&rows, 0),
        column(&rows, 1),
        column(&rows, 2),
        column(&rows, 3),
        f32x16::splat(cell.frac_b),
    )
    .to_lanes();

    let res = spline3(
        quarter(&v0123, 0),
        quarter(&v0123, 1),
        quarter(&v0123, 2),
        quarter(&v0123, 3),
        f32x4::splat(cell.frac_a),
    )
    .to_lanes();
    [res[0], res[1], res[2]]
}
