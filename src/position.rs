//! Mapping of query coordinates onto 4x4 stencils of the grid

use crate::grid::Grid;
use crate::Point2;

/// Geometry of one grid axis as needed on the hot path
#[derive(Debug, Clone, Copy)]
pub struct Axis {
    pub min: f32,
    pub inv_step: f32,
    pub count: usize,
}

impl Axis {
    /// Stencil base index and fractional offset for `coord`
    ///
    /// The coordinate is first clamped to the grid, so anything outside
    /// resolves exactly like the nearest in-range coordinate. The stencil
    /// `[base, base + 3]` always lies inside `[0, count - 1]`, and the
    /// fraction is measured from `base + 1`.
    #[inline(always)]
    pub fn resolve(&self, coord: f32) -> (usize, f32) {
        let last = (self.count - 1) as f32;
        let raw = ((coord - self.min) * self.inv_step).clamp(0.0, last);
        // NaN casts to 0 and is then pulled up to 1 like any low index
        let i = (raw as usize).clamp(1, self.count - 3);
        (i - 1, raw - i as f32)
    }
}

/// Stencil location of one query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellPosition {
    /// Row-major index of the stencil's first sample
    pub index: usize,
    pub frac_a: f32,
    pub frac_b: f32,
}

/// Per-lane stencil locations for a group of `N` queries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LanePositions<const N: usize> {
    pub index: [usize; N],
    pub frac_a: [f32; N],
    pub frac_b: [f32; N],
}

/// Axis A and B descriptors of `grid`
#[inline(always)]
pub fn axes(grid: &Grid) -> (Axis, Axis) {
    (
        Axis {
            min: grid.min_a(),
            inv_step: grid.inv_step_a(),
            count: grid.count_a(),
        },
        Axis {
            min: grid.min_b(),
            inv_step: grid.inv_step_b(),
            count: grid.count_b(),
        },
    )
}

/// Resolve a single query against `grid`
#[inline(always)]
pub fn resolve(grid: &Grid, ab: Point2) -> CellPosition {
    let (axis_a, axis_b) = axes(grid);
    let (ia, frac_a) = axis_a.resolve(ab[0]);
    let (ib, frac_b) = axis_b.resolve(ab[1]);
    CellPosition {
        index: ia * grid.count_b() + ib,
        frac_a,
        frac_b,
    }
}

/// Resolve `N` queries, each lane independently
#[inline(always)]
pub fn resolve_lanes<const N: usize>(grid: &Grid, points: &[Point2; N]) -> LanePositions<N> {
    let mut out = LanePositions {
        index: [0; N],
        frac_a: [0.0; N],
        frac_b: [0.0; N],
    };
    for (lane, &p) in points.iter().enumerate() {
        let cell = resolve(grid, p);
        out.index[lane] = cell.index;
        out.frac_a[lane] = cell.frac_a;
        out.frac_b[lane] = cell.frac_b;
    }
    out
}
