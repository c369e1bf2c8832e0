//! One-dimensional cubic interpolation over a 4-sample stencil
//!
//! The same routine is instantiated for plain `f32` and for the `wide`
//! vector types, so every evaluation mode runs the identical sequence of
//! operations per lane.

use std::ops::{Add, Mul, Sub};
use wide::{f32x16, f32x4, f32x8};

/// A value holding one or more `f32` lanes with elementwise arithmetic.
pub trait Lanes: Copy + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> {
    /// Broadcast a scalar to every lane.
    fn splat(v: f32) -> Self;
}

/// Conversion between a lane type and a plain array of its `N` lanes
pub trait LaneArray<const N: usize>: Lanes {
    fn from_lanes(lanes: [f32; N]) -> Self;
    fn to_lanes(self) -> [f32; N];
}

impl Lanes for f32 {
    #[inline(always)]
    fn splat(v: f32) -> Self {
        v
    }
}

impl Lanes for f32x4 {
    #[inline(always)]
    fn splat(v: f32) -> Self {
        f32x4::splat(v)
    }
}

impl Lanes for f32x8 {
    #[inline(always)]
    fn splat(v: f32) -> Self {
        f32x8::splat(v)
    }
}

impl Lanes for f32x16 {
    #[inline(always)]
    fn splat(v: f32) -> Self {
        f32x16::splat(v)
    }
}

impl LaneArray<1> for f32 {
    #[inline(always)]
    fn from_lanes(lanes: [f32; 1]) -> Self {
        lanes[0]
    }

    #[inline(always)]
    fn to_lanes(self) -> [f32; 1] {
        [self]
    }
}

impl LaneArray<4> for f32x4 {
    #[inline(always)]
    fn from_lanes(lanes: [f32; 4]) -> Self {
        f32x4::new(lanes)
    }

    #[inline(always)]
    fn to_lanes(self) -> [f32; 4] {
        self.to_array()
    }
}

impl LaneArray<8> for f32x8 {
    #[inline(always)]
    fn from_lanes(lanes: [f32; 8]) -> Self {
        f32x8::new(lanes)
    }

    #[inline(always)]
    fn to_lanes(self) -> [f32; 8] {
        self.to_array()
    }
}

impl LaneArray<16> for f32x16 {
    #[inline(always)]
    fn from_lanes(lanes: [f32; 16]) -> Self {
        f32x16::new(lanes)
    }

    #[inline(always)]
    fn to_lanes(self) -> [f32; 16] {
        self.to_array()
    }
}

/// Cubic interpolation between `v1` and `v2`
///
/// Samples sit at parameter positions 0..3 and `x` is measured from `v1`.
/// Tangents are centered differences, which makes this Catmull-Rom
/// interpolation reparameterized around `v1`:
///
/// ```text
/// dv = v2 - v1
/// z0 = 0.5 * (v2 - v0)
/// z1 = 0.5 * (v3 - v1)
/// f(x) = x² * ((z1 - dv) * (x - 1) + (z0 - dv) * (x - 2)) + z0 * x + v1
/// ```
#[inline(always)]
pub fn spline3<T: Lanes>(v0: T, v1: T, v2: T, v3: T, x: T) -> T {
    let half = T::splat(0.5);
    let dv = v2 - v1;
    let z0 = half * (v2 - v0);
    let z1 = half * (v3 - v1);
    (x * x) * ((z1 - dv) * (x - T::splat(1.0)) + (z0 - dv) * (x - T::splat(2.0))) + (z0 * x + v1)
}

/// [`spline3`] over a 4-element stencil array
#[inline(always)]
pub fn spline3_array<T: Lanes>(v: &[T; 4], x: T) -> T {
    spline3(v[0], v[1], v[2], v[3], x)
}

/// Tensor-product pass over a 4x4 stencil
///
/// `rows[i][j]` is the sample at stencil row `i` (axis A) and column `j`
/// (axis B). Each row is interpolated along B at `db`, then the four row
/// values along A at `da`.
#[inline(always)]
pub fn bicubic<T: Lanes>(rows: &[[T; 4]; 4], da: T, db: T) -> T {
    let v = [
        spline3_array(&rows[0], db),
        spline3_array(&rows[1], db),
        spline3_array(&rows[2], db),
        spline3_array(&rows[3], db),
    ];
    spline3_array(&v, da)
}
