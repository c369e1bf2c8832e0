//! Strided loads of grid samples into lane positions
//!
//! Grid samples are stored as padded `[x, y, z, 0]` records, so the
//! channel `c` of node `n` is float `n * 4 + c`. Single-query modes read
//! whole records at fixed offsets from the stencil origin; batched modes
//! need one channel from a different node in every lane.

use crate::grid::Sample;

/// Floats per stored sample
pub const SAMPLE_STRIDE: usize = 4;

/// Load `data[offsets[lane]]` into `lane` for every lane
#[inline(always)]
pub fn gather<const N: usize>(data: &[f32], offsets: &[usize; N]) -> [f32; N] {
    let mut out = [0.0f32; N];
    for (dst, &offset) in out.iter_mut().zip(offsets) {
        *dst = data[offset];
    }
    out
}

/// Float offset of `channel` of node `node`
#[inline(always)]
pub fn channel_offset(node: usize, channel: usize) -> usize {
    node * SAMPLE_STRIDE + channel
}

/// The 16 records of the stencil whose first node is `index`
///
/// `rows[i][j]` is node `index + i * row_len + j`.
#[inline(always)]
pub fn stencil_records(samples: &[Sample], index: usize, row_len: usize) -> [[Sample; 4]; 4] {
    let row = |i: usize| {
        let start = index + i * row_len;
        let r = &samples[start..start + 4];
        [r[0], r[1], r[2], r[3]]
    };
    [row(0), row(1), row(2), row(3)]
}

/// One channel of `N` independent stencils, lane-interleaved
///
/// `out[i][j][lane]` is `channel` of node `index[lane] + i * row_len + j`.
#[inline(always)]
pub fn gather_stencil<const N: usize>(
    data: &[f32],
    index: &[usize; N],
    row_len: usize,
    channel: usize,
) -> [[[f32; N]; 4]; 4] {
    let mut out = [[[0.0f32; N]; 4]; 4];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            let offsets = index.map(|base| channel_offset(base + i * row_len + j, channel));
            *cell = gather(data, &offsets);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(n: usize) -> Vec<Sample> {
        (0..n)
            .map(|k| {
                let k = k as f32;
                [k, k + 0.25, k + 0.5, 0.0]
            })
            .collect()
    }

    #[test]
    fn test_gather_picks_offsets() {
        let data: Vec<f32> = (0..32).map(|v| v as f32).collect();
        assert_eq!(gather(&data, &[3, 0, 31, 3]), [3.0, 0.0, 31.0, 3.0]);
    }

    #[test]
    fn test_channel_offset_crosses_records() {
        let recs = records(10);
        let data = recs.as_flattened();
        assert_eq!(data[channel_offset(7, 1)], 7.25);
        assert_eq!(data[channel_offset(2, 2)], 2.5);
        assert_eq!(data[channel_offset(5, 3)], 0.0);
    }

    #[test]
    fn test_stencil_records_layout() {
        let recs = records(6 * 6);
        let rows = stencil_records(&recs, 7, 6);
        assert_eq!(rows[0][0][0], 7.0);
        assert_eq!(rows[0][3][0], 10.0);
        assert_eq!(rows[1][0][0], 13.0);
        assert_eq!(rows[3][3][2], 28.5);
    }

    #[test]
    fn test_gather_stencil_per_lane() {
        let recs = records(5 * 5);
        let data = recs.as_flattened();
        let out = gather_stencil(data, &[0, 6], 5, 1);
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(out[i][j][0], (i * 5 + j) as f32 + 0.25);
                assert_eq!(out[i][j][1], (6 + i * 5 + j) as f32 + 0.25);
            }
        }
    }
}
