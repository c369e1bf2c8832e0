//! Scalar (non-SIMD) evaluation
//!
//! This is the reference path the vectorized modes are checked against.

use crate::cubic::bicubic;
use crate::gather::stencil_records;
use crate::grid::Grid;
use crate::position::resolve;
use crate::{Point2, Point3};

/// Evaluate the surface at `ab`, one channel at a time
#[inline]
pub fn evaluate_scalar(grid: &Grid, ab: Point2) -> Point3 {
    let cell = resolve(grid, ab);
    let rows = stencil_records(grid.samples(), cell.index, grid.count_b());

    let channel = |c: usize| {
        let v = rows.map(|row| row.map(|sample| sample[c]));
        bicubic(&v, cell.frac_a, cell.frac_b)
    };
    [channel(0), channel(1), channel(2)]
}
