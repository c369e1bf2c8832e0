//! Fast bicubic surface interpolation with scalar, SIMD and batched evaluators
//!
//! This crate evaluates a smooth 3-component surface defined by control
//! points on a regular 2D grid. Each query locates its 4x4 stencil of
//! control points and blends them with Catmull-Rom cubics, first along
//! axis B for every stencil row and then along axis A.
//!
//! # Features
//!
//! - **Four interchangeable strategies**: scalar, 4-wide per query, 16-wide
//!   per query and horizontally batched (8 queries per call), all built on
//!   one generic cubic routine and agreeing bit for bit
//! - **AVX2 gathers**: the batched mode uses `vgatherdps` when available
//! - **Parallel execution**: uses rayon for bulk evaluation of query slices
//! - **ndarray integration**: grids can be built from `(a, b, 3)` arrays
//!
//! # Example
//!
//! ```rust
//! use bicubic_simd::{Evaluator, Grid, Mode};
//!
//! // 16x16 nodes over [-1, 1] x [-1, 1]
//! let mut grid = Grid::new(-1.0, 1.0, 16, -1.0, 1.0, 16);
//! grid.fill_with(|a, b| [a, b, a * b]);
//!
//! let eval = Evaluator::new(&grid);
//! let p = eval.evaluate(Mode::Vec4, [0.25, -0.5]);
//! assert!((p[2] + 0.125).abs() < 1e-5);
//! ```

pub mod cubic;
pub mod gather;
pub mod grid;
pub mod position;
pub mod scalar;
pub mod simd;

pub use grid::{Grid, GridError};
pub use simd::horizontal::BATCH_LANES;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Query coordinate `[a, b]`
pub type Point2 = [f32; 2];

/// Interpolated value `[x, y, z]`
pub type Point3 = [f32; 3];

/// Queries handed to one rayon task by [`Evaluator::evaluate_points_into`]
#[cfg(feature = "parallel")]
const PARALLEL_CHUNK: usize = 128 * BATCH_LANES;

/// Evaluation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// One channel at a time, plain `f32`
    Scalar,
    /// Channels packed into one 4-wide vector per query
    Vec4,
    /// All stencil rows packed into one 16-wide vector per query
    Vec16,
    /// `BATCH_LANES` queries per vector operation
    Batch,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Scalar, Mode::Vec4, Mode::Vec16, Mode::Batch];

    pub fn name(self) -> &'static str {
        match self {
            Mode::Scalar => "scalar",
            Mode::Vec4 => "vec4",
            Mode::Vec16 => "vec16",
            Mode::Batch => "batch",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Read-only evaluator over a filled [`Grid`]
///
/// Holds only a shared borrow, so it is `Copy` and can be used from any
/// number of threads at once.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'g> {
    grid: &'g Grid,
    #[cfg_attr(not(all(target_arch = "x86_64", feature = "avx2")), allow(dead_code))]
    gather_offsets_fit: bool,
}

impl<'g> Evaluator<'g> {
    #[inline]
    pub fn new(grid: &'g Grid) -> Self {
        Self {
            grid,
            gather_offsets_fit: grid.sample_floats().len() <= i32::MAX as usize,
        }
    }

    #[inline]
    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    #[inline]
    pub fn evaluate_scalar(&self, ab: Point2) -> Point3 {
        scalar::evaluate_scalar(self.grid, ab)
    }

    #[inline]
    pub fn evaluate_vec4(&self, ab: Point2) -> Point3 {
        simd::vec4::evaluate_vec4(self.grid, ab)
    }

    #[inline]
    pub fn evaluate_vec16(&self, ab: Point2) -> Point3 {
        simd::vec16::evaluate_vec16(self.grid, ab)
    }

    /// Evaluate `BATCH_LANES` queries at once
    ///
    /// Uses AVX2 gathers when the CPU supports them, otherwise the portable
    /// `wide` backend. Both give identical results.
    #[inline]
    pub fn evaluate_batch(&self, points: &[Point2; BATCH_LANES]) -> [Point3; BATCH_LANES] {
        #[cfg(all(target_arch = "x86_64", feature = "avx2"))]
        {
            if self.gather_offsets_fit && is_x86_feature_detected!("avx2") {
                unsafe {
                    return simd::avx2::evaluate_batch_avx2(self.grid, points);
                }
            }
        }

        simd::horizontal::evaluate_batch_portable(self.grid, points)
    }

    /// Name of the backend [`Evaluator::evaluate_batch`] dispatches to
    pub fn batch_backend(&self) -> &'static str {
        #[cfg(all(target_arch = "x86_64", feature = "avx2"))]
        {
            if self.gather_offsets_fit && is_x86_feature_detected!("avx2") {
                return "avx2";
            }
        }

        "portable"
    }

    /// Evaluate one query with the given strategy
    ///
    /// In [`Mode::Batch`] the query fills every lane of a batch.
    #[inline]
    pub fn evaluate(&self, mode: Mode, ab: Point2) -> Point3 {
        match mode {
            Mode::Scalar => self.evaluate_scalar(ab),
            Mode::Vec4 => self.evaluate_vec4(ab),
            Mode::Vec16 => self.evaluate_vec16(ab),
            Mode::Batch => self.evaluate_batch(&[ab; BATCH_LANES])[0],
        }
    }

    /// Evaluate every query of `points`
    pub fn evaluate_points(&self, mode: Mode, points: &[Point2]) -> Vec<Point3> {
        let mut out = vec![[0.0f32; 3]; points.len()];
        self.evaluate_points_into(mode, points, &mut out);
        out
    }

    /// Evaluate every query of `points` into `out`
    ///
    /// # Panics
    ///
    /// If `points` and `out` differ in length.
    pub fn evaluate_points_into(&self, mode: Mode, points: &[Point2], out: &mut [Point3]) {
        assert_eq!(points.len(), out.len());

        #[cfg(feature = "parallel")]
        {
            points
                .par_chunks(PARALLEL_CHUNK)
                .zip(out.par_chunks_mut(PARALLEL_CHUNK))
                .for_each(|(p, o)| self.evaluate_chunk(mode, p, o));
        }

        #[cfg(not(feature = "parallel"))]
        {
            self.evaluate_chunk(mode, points, out);
        }
    }

    fn evaluate_chunk(&self, mode: Mode, points: &[Point2], out: &mut [Point3]) {
        if mode != Mode::Batch {
            for (p, o) in points.iter().zip(out.iter_mut()) {
                *o = self.evaluate(mode, *p);
            }
            return;
        }

        let mut p_chunks = points.chunks_exact(BATCH_LANES);
        let mut o_chunks = out.chunks_exact_mut(BATCH_LANES);
        for (p, o) in (&mut p_chunks).zip(&mut o_chunks) {
            let batch: &[Point2; BATCH_LANES] = p.try_into().expect("chunk has BATCH_LANES points");
            o.copy_from_slice(&self.evaluate_batch(batch));
        }

        // Pad the tail with its last query and drop the extra lanes
        let tail = p_chunks.remainder();
        if let Some(&last) = tail.last() {
            let mut batch = [last; BATCH_LANES];
            batch[..tail.len()].copy_from_slice(tail);
            let res = self.evaluate_batch(&batch);
            o_chunks.into_remainder().copy_from_slice(&res[..tail.len()]);
        }
    }
}
