//! Benchmarks for bicubic surface evaluation

use bicubic_simd::{scalar, simd, Evaluator, Grid, Mode, Point2, BATCH_LANES};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const EVALUATIONS: usize = 10_000;

fn random_grid(rng: &mut StdRng, size: usize) -> Grid {
    let mut grid = Grid::new(-1.0, 1.0, size, -1.0, 1.0, size);
    for i in 0..grid.point_count() {
        let xyz = [rng.gen_range(-1.0f32..1.0), rng.gen_range(-1.0f32..1.0), rng.gen_range(-1.0f32..1.0)];
        grid.fill(i, xyz);
    }
    grid
}

fn search_points(rng: &mut StdRng) -> Vec<Point2> {
    let mut points = vec![[-1.0, -1.0], [1.0, 1.0]];
    points.extend((2..EVALUATIONS).map(|_| [rng.gen_range(-1.0f32..1.0), rng.gen_range(-1.0f32..1.0)]));
    points
}

fn benchmark_single_query_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("spline_single_query");
    let mut rng = StdRng::seed_from_u64(1);
    let points = search_points(&mut rng);

    for size in [4, 16, 64, 256].iter() {
        let grid = random_grid(&mut rng, *size);
        let eval = Evaluator::new(&grid);
        group.throughput(Throughput::Elements(points.len() as u64));

        group.bench_with_input(BenchmarkId::new("scalar", size), &size, |b, _| {
            b.iter(|| {
                for p in &points {
                    black_box(scalar::evaluate_scalar(&grid, *p));
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("vec4", size), &size, |b, _| {
            b.iter(|| {
                for p in &points {
                    black_box(eval.evaluate_vec4(*p));
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("vec16", size), &size, |b, _| {
            b.iter(|| {
                for p in &points {
                    black_box(eval.evaluate_vec16(*p));
                }
            })
        });
    }

    group.finish();
}

fn benchmark_batched_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("spline_batch");
    let mut rng = StdRng::seed_from_u64(2);
    let points = search_points(&mut rng);

    for size in [4, 16, 64, 256].iter() {
        let grid = random_grid(&mut rng, *size);
        let eval = Evaluator::new(&grid);
        group.throughput(Throughput::Elements(points.len() as u64));

        // Auto-dispatch (AVX2 gathers when available)
        group.bench_with_input(BenchmarkId::new("auto", size), &size, |b, _| {
            b.iter(|| {
                for chunk in points.chunks_exact(BATCH_LANES) {
                    let batch: &[Point2; BATCH_LANES] = chunk.try_into().unwrap();
                    black_box(eval.evaluate_batch(batch));
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("portable", size), &size, |b, _| {
            b.iter(|| {
                for chunk in points.chunks_exact(BATCH_LANES) {
                    let batch: &[Point2; BATCH_LANES] = chunk.try_into().unwrap();
                    black_box(simd::horizontal::evaluate_batch_portable(&grid, batch));
                }
            })
        });

        // Explicit AVX2
        #[cfg(all(target_arch = "x86_64", feature = "avx2"))]
        if is_x86_feature_detected!("avx2") {
            group.bench_with_input(BenchmarkId::new("avx2", size), &size, |b, _| {
                b.iter(|| {
                    for chunk in points.chunks_exact(BATCH_LANES) {
                        let batch: &[Point2; BATCH_LANES] = chunk.try_into().unwrap();
                        black_box(unsafe { simd::avx2::evaluate_batch_avx2(&grid, batch) });
                    }
                })
            });
        }
    }

    group.finish();
}

fn benchmark_bulk(c: &mut Criterion) {
    let mut group = c.benchmark_group("spline_bulk");
    let mut rng = StdRng::seed_from_u64(3);
    let points = search_points(&mut rng);
    let grid = random_grid(&mut rng, 128);
    let eval = Evaluator::new(&grid);
    group.throughput(Throughput::Elements(points.len() as u64));

    for mode in Mode::ALL {
        group.bench_function(mode.name(), |b| b.iter(|| black_box(eval.evaluate_points(mode, &points))));
    }

    group.finish();
}

criterion_group!(benches, benchmark_single_query_modes, benchmark_batched_modes, benchmark_bulk);
criterion_main!(benches);
