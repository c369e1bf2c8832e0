//! AVX2-optimized horizontally batched evaluation
//!
//! Eight queries per call. Positions are resolved per lane, then every
//! stencil sample of a channel is fetched with one `vgatherdps` using
//! 32-bit float offsets into the padded sample array.

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::grid::Grid;
use crate::position::resolve_lanes;
use crate::simd::horizontal::BATCH_LANES;
use crate::{Point2, Point3};

/// Same operation order as `cubic::spline3`, without FMA, so lanes match
/// the portable paths bit for bit.
#[target_feature(enable = "avx2")]
#[inline]
unsafe fn spline3_avx2(v0: __m256, v1: __m256, v2: __m256, v3: __m256, x: __m256) -> __m256 {
    let half = _mm256_set1_ps(0.5);
    let dv = _mm256_sub_ps(v2, v1);
    let z0 = _mm256_mul_ps(half, _mm256_sub_ps(v2, v0));
    let z1 = _mm256_mul_ps(half, _mm256_sub_ps(v3, v1));
    let t1 = _mm256_mul_ps(_mm256_sub_ps(z1, dv), _mm256_sub_ps(x, _mm256_set1_ps(1.0)));
    let t2 = _mm256_mul_ps(_mm256_sub_ps(z0, dv), _mm256_sub_ps(x, _mm256_set1_ps(2.0)));
    _mm256_add_ps(
        _mm256_mul_ps(_mm256_mul_ps(x, x), _mm256_add_ps(t1, t2)),
        _mm256_add_ps(_mm256_mul_ps(z0, x), v1),
    )
}

/// AVX2 8-query batch
///
/// # Safety
///
/// Requires the AVX2 CPU feature. Caller must verify it is available and
/// that every float offset of the grid fits in an `i32`.
#[target_feature(enable = "avx2")]
pub unsafe fn evaluate_batch_avx2(grid: &Grid, points: &[Point2; BATCH_LANES]) -> [Point3; BATCH_LANES] {
    let pos = resolve_lanes(grid, points);
    let data = grid.sample_floats();
    let row_len = grid.count_b();

    let da = _mm256_loadu_ps(pos.frac_a.as_ptr());
    let db = _mm256_loadu_ps(pos.frac_b.as_ptr());

    let base: [i32; BATCH_LANES] = pos.index.map(|i| (i * 4) as i32);
    let base = _mm256_loadu_si256(base.as_ptr() as *const __m256i);

    let mut out = [[0.0f32; 3]; BATCH_LANES];
    let mut lanes = [0.0f32; BATCH_LANES];

    for c in 0..3 {
        let channel_base = _mm256_add_epi32(base, _mm256_set1_epi32(c as i32));
        let mut v = [_mm256_setzero_ps(); 4];

        for (i, vi) in v.iter_mut().enumerate() {
            let mut s = [_mm256_setzero_ps(); 4];
            for (j, sj) in s.iter_mut().enumerate() {
                let offset = ((i * row_len + j) * 4) as i32;
                let idx = _mm256_add_epi32(channel_base, _mm256_set1_epi32(offset));
                *sj = _mm256_i32gather_ps::<4>(data.as_ptr(), idx);
            }
            *vi = spline3_avx2(s[0], s[1], s[2], s[3], db);
        }

        let res = spline3_avx2(v[0], v[1], v[2], v[3], da);
        _mm256_storeu_ps(lanes.as_mut_ptr(), res);
        for (point, &value) in out.iter_mut().zip(&lanes) {
            point[c] = value;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::evaluate_scalar;

    #[test]
    fn test_avx2_matches_scalar() {
        if !is_x86_feature_detected!("avx2") {
            return;
        }

        let mut grid = Grid::new(-1.0, 1.0, 21, -2.0, 2.0, 15);
        grid.fill_with(|a, b| [a * b * b, (a * 3.0).cos(), b - a * a * a]);

        for k in 0..25 {
            let points: [Point2; BATCH_LANES] = std::array::from_fn(|i| {
                let t = ((k * 8 + i) * 29 % 97) as f32 / 48.0 - 1.0;
                let u = ((k * 8 + i) * 43 % 89) as f32 / 20.0 - 2.2;
                [t * 1.05, u]
            });
            let got = unsafe { evaluate_batch_avx2(&grid, &points) };
            for (p, g) in points.iter().zip(&got) {
                let s = evaluate_scalar(&grid, *p);
                for c in 0..3 {
                    assert_eq!(s[c].to_bits(), g[c].to_bits(), "query {p:?} channel {c}");
                }
            }
        }
    }
}
