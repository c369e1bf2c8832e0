//! Horizontally batched evaluation
//!
//! Instead of spreading one query's channels over the lanes, each vector
//! holds the same channel of `N` different queries. Every lane can sit in
//! a different cell, so samples are gathered per lane.

use wide::f32x8;

use crate::cubic::{bicubic, LaneArray};
use crate::gather::gather_stencil;
use crate::grid::Grid;
use crate::position::resolve_lanes;
use crate::{Point2, Point3};

/// Queries per batch for the 256-bit backends
pub const BATCH_LANES: usize = 8;

/// Evaluate `N` queries at once with lane type `V`
#[inline]
pub fn evaluate_lanes<V, const N: usize>(grid: &Grid, points: &[Point2; N]) -> [Point3; N]
where
    V: LaneArray<N>,
{
    let pos = resolve_lanes(grid, points);
    let data = grid.sample_floats();
    let da = V::from_lanes(pos.frac_a);
    let db = V::from_lanes(pos.frac_b);

    let channel = |c: usize| {
        let rows = gather_stencil(data, &pos.index, grid.count_b(), c).map(|row| row.map(V::from_lanes));
        bicubic(&rows, da, db).to_lanes()
    };
    let (x, y, z) = (channel(0), channel(1), channel(2));

    std::array::from_fn(|lane| [x[lane], y[lane], z[lane]])
}

/// Portable 8-query batch on `wide::f32x8`
#[inline]
pub fn evaluate_batch_portable(grid: &Grid, points: &[Point2; BATCH_LANES]) -> [Point3; BATCH_LANES] {
    evaluate_lanes::<f32x8, BATCH_LANES>(grid, points)
}
