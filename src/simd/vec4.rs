//! Single-query evaluation with the channels packed as `{x, y, z, pad}`

use wide::f32x4;

use crate::cubic::{bicubic, LaneArray};
use crate::gather::stencil_records;
use crate::grid::Grid;
use crate::position::resolve;
use crate::{Point2, Point3};

/// Evaluate the surface at `ab` with 5 four-wide spline passes
#[inline]
pub fn evaluate_vec4(grid: &Grid, ab: Point2) -> Point3 {
    let cell = resolve(grid, ab);
    let rows = stencil_records(grid.samples(), cell.index, grid.count_b())
        .map(|row| row.map(f32x4::from_lanes));

    let res = bicubic(&rows, f32x4::splat(cell.frac_a), f32x4::splat(cell.frac_b)).to_lanes();
    [res[0], res[1], res[2]]
}
