//! Control-point storage for the interpolation surface

use log::{debug, trace};
use ndarray::{Array2, ArrayView3};
use thiserror::Error;

use crate::{Point2, Point3};

/// Smallest number of nodes per axis; the cubic stencil spans 4 samples.
pub const MIN_POINTS: usize = 4;

/// Padded sample as stored in the grid: `[x, y, z, 0.0]`
pub type Sample = [f32; 4];

/// Errors from building a grid out of existing data
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("expected 3 channels in the last axis, found {0}")]
    ChannelCount(usize),
    #[error("grid needs at least 4 nodes per axis, got {count_a}x{count_b}")]
    TooSmall { count_a: usize, count_b: usize },
}

/// Regular 2D grid of 3-component control points
///
/// Samples are kept row-major, so node `(a, b)` lives at flat index
/// `a * count_b + b`. Each sample carries a zero padding lane so that a
/// node can be loaded as one 4-wide vector.
#[derive(Debug, Clone)]
pub struct Grid {
    count_a: usize,
    count_b: usize,
    min_a: f32,
    min_b: f32,
    step_a: f32,
    step_b: f32,
    inv_step_a: f32,
    inv_step_b: f32,
    samples: Array2<Sample>,
}

/// Step for `count` nodes spanning `[min, max]`, replacing a degenerate
/// upper bound with `min + 1`.
fn axis_step(axis: char, min: f32, max: f32, count: usize) -> f32 {
    let max = if max <= min {
        debug!("grid axis {axis}: bounds [{min}, {max}] are degenerate, using [{min}, {}]", min + 1.0);
        min + 1.0
    } else {
        max
    };
    (max - min) / (count - 1) as f32
}

fn axis_count(axis: char, count: usize) -> usize {
    if count < MIN_POINTS {
        debug!("grid axis {axis}: {count} points requested, raising to {MIN_POINTS}");
        MIN_POINTS
    } else {
        count
    }
}

impl Grid {
    /// Create a zero-filled grid
    ///
    /// Point counts below 4 are raised to 4 and an upper bound that is not
    /// above the lower one is replaced by `min + 1`.
    pub fn new(min_a: f32, max_a: f32, count_a: usize, min_b: f32, max_b: f32, count_b: usize) -> Self {
        let count_a = axis_count('A', count_a);
        let count_b = axis_count('B', count_b);
        let step_a = axis_step('A', min_a, max_a, count_a);
        let step_b = axis_step('B', min_b, max_b, count_b);

        trace!(
            "grid {count_a}x{count_b}: A from {min_a} step {step_a}, B from {min_b} step {step_b}"
        );

        Self {
            count_a,
            count_b,
            min_a,
            min_b,
            step_a,
            step_b,
            inv_step_a: 1.0 / step_a,
            inv_step_b: 1.0 / step_b,
            samples: Array2::from_elem((count_a, count_b), [0.0; 4]),
        }
    }

    /// Build a grid from a `(count_a, count_b, 3)` array of control points
    pub fn from_array(
        min_a: f32,
        max_a: f32,
        min_b: f32,
        max_b: f32,
        values: &ArrayView3<f32>,
    ) -> Result<Self, GridError> {
        let (count_a, count_b, channels) = values.dim();
        if channels != 3 {
            return Err(GridError::ChannelCount(channels));
        }
        if count_a < MIN_POINTS || count_b < MIN_POINTS {
            return Err(GridError::TooSmall { count_a, count_b });
        }

        let mut grid = Self::new(min_a, max_a, count_a, min_b, max_b, count_b);
        for ((a, b), sample) in grid.samples.indexed_iter_mut() {
            *sample = [values[[a, b, 0]], values[[a, b, 1]], values[[a, b, 2]], 0.0];
        }
        Ok(grid)
    }

    /// Store the control point at flat index `index`
    ///
    /// # Panics
    ///
    /// If `index >= self.point_count()`.
    #[inline]
    pub fn fill(&mut self, index: usize, value: Point3) {
        let count = self.point_count();
        assert!(index < count, "fill index {index} out of range for {count} grid points");
        let (a, b) = (index / self.count_b, index % self.count_b);
        self.samples[[a, b]] = [value[0], value[1], value[2], 0.0];
    }

    /// Fill every node with `f(a, b)` evaluated at the node's coordinate
    pub fn fill_with<F>(&mut self, mut f: F)
    where
        F: FnMut(f32, f32) -> Point3,
    {
        for index in 0..self.point_count() {
            let [a, b] = self.node_coord(index / self.count_b, index % self.count_b);
            self.fill(index, f(a, b));
        }
    }

    /// Total number of control points
    #[inline]
    pub fn point_count(&self) -> usize {
        self.count_a * self.count_b
    }

    /// Larger of the two per-axis point counts
    #[inline]
    pub fn map_size(&self) -> usize {
        self.count_a.max(self.count_b)
    }

    /// Coordinate of node `(i, j)`
    #[inline]
    pub fn node_coord(&self, i: usize, j: usize) -> Point2 {
        [
            self.min_a + i as f32 * self.step_a,
            self.min_b + j as f32 * self.step_b,
        ]
    }

    /// Control point at flat index `index`
    #[inline]
    pub fn sample(&self, index: usize) -> Point3 {
        let s = self.samples()[index];
        [s[0], s[1], s[2]]
    }

    /// All padded samples in row-major order
    #[inline]
    pub fn samples(&self) -> &[Sample] {
        self.samples.as_slice().expect("grid samples are C-contiguous")
    }

    /// All samples as one flat run of floats, 4 per node
    #[inline]
    pub fn sample_floats(&self) -> &[f32] {
        self.samples().as_flattened()
    }

    #[inline]
    pub fn count_a(&self) -> usize {
        self.count_a
    }

    #[inline]
    pub fn count_b(&self) -> usize {
        self.count_b
    }

    #[inline]
    pub fn min_a(&self) -> f32 {
        self.min_a
    }

    #[inline]
    pub fn min_b(&self) -> f32 {
        self.min_b
    }

    #[inline]
    pub fn max_a(&self) -> f32 {
        self.min_a + (self.count_a - 1) as f32 * self.step_a
    }

    #[inline]
    pub fn max_b(&self) -> f32 {
        self.min_b + (self.count_b - 1) as f32 * self.step_b
    }

    #[inline]
    pub fn step_a(&self) -> f32 {
        self.step_a
    }

    #[inline]
    pub fn step_b(&self) -> f32 {
        self.step_b
    }

    #[inline]
    pub fn inv_step_a(&self) -> f32 {
        self.inv_step_a
    }

    #[inline]
    pub fn inv_step_b(&self) -> f32 {
        self.inv_step_b
    }
}
