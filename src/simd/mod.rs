//! SIMD evaluation strategies
//!
//! - [`vec4`]: one query, the three channels (plus padding) in one 4-wide vector
//! - [`vec16`]: one query, all four stencil rows in one 16-wide vector
//! - [`horizontal`]: `N` queries per call, one channel of every query per vector
//! - `avx2`: the 8-query batch with hardware gathers (x86_64 only)

pub mod horizontal;
pub mod vec16;
pub mod vec4;

#[cfg(all(target_arch = "x86_64", feature = "avx2"))]
pub mod avx2;
