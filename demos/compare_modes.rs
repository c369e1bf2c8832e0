//! Time every evaluation mode over growing map sizes and verify that all
//! of them agree with the scalar path

use bicubic_simd::{Evaluator, Grid, Mode, Point2, Point3, BATCH_LANES};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;
use std::process::ExitCode;
use std::time::Instant;

const EVALUATIONS: usize = 10_000;
const FIRST_MAP_SIZE: usize = 4;
const MAX_MAP_SIZE: usize = 256;
const STEP_MULTIPLIER: f64 = 1.25;
const REPETITIONS: usize = 20;
const TOLERANCE: f32 = 1e-5;

/// Mean nanoseconds per query over `REPETITIONS` runs, after one warm-up run
fn time_mode(eval: &Evaluator, mode: Mode, points: &[Point2]) -> f64 {
    let run = || {
        if mode == Mode::Batch {
            for chunk in points.chunks_exact(BATCH_LANES) {
                let batch: &[Point2; BATCH_LANES] = chunk.try_into().unwrap();
                black_box(eval.evaluate_batch(batch));
            }
        } else {
            for p in points {
                black_box(eval.evaluate(mode, *p));
            }
        }
    };

    run();
    let start = Instant::now();
    for _ in 0..REPETITIONS {
        run();
    }
    start.elapsed().as_nanos() as f64 / (REPETITIONS * points.len()) as f64
}

fn first_mismatch(eval: &Evaluator, mode: Mode, points: &[Point2]) -> Option<(Point2, Point3, Point3)> {
    let got = eval.evaluate_points(mode, points);
    points.iter().zip(got).find_map(|(p, g)| {
        let s = eval.evaluate_scalar(*p);
        let differs = (0..3).any(|c| (s[c] - g[c]).abs() > TOLERANCE);
        differs.then_some((*p, s, g))
    })
}

fn main() -> ExitCode {
    let mut rng = StdRng::seed_from_u64(1);

    let mut points: Vec<Point2> = vec![[-1.0, -1.0], [1.0, 1.0]];
    points.extend((2..EVALUATIONS).map(|_| [rng.gen_range(-1.0f32..1.0), rng.gen_range(-1.0f32..1.0)]));
    // whole batches only, so every mode times the same queries
    points.truncate(points.len() / BATCH_LANES * BATCH_LANES);

    println!("NumberOfEvaluations: {}", points.len());
    println!("Repetitions: {REPETITIONS}");
    print!("{:>8}", "MapSize");
    for mode in Mode::ALL {
        print!("{:>12}", format!("{mode} ns"));
    }
    for mode in &Mode::ALL[1..] {
        print!("{:>16}", format!("scalar/{mode}"));
    }
    println!();

    let mut size = FIRST_MAP_SIZE;
    while size <= MAX_MAP_SIZE {
        let mut grid = Grid::new(-1.0, 1.0, size, -1.0, 1.0, size);
        for i in 0..grid.point_count() {
            let xyz = [rng.gen_range(-1.0f32..1.0), rng.gen_range(-1.0f32..1.0), rng.gen_range(-1.0f32..1.0)];
            grid.fill(i, xyz);
        }
        let eval = Evaluator::new(&grid);

        print!("{:>8}", grid.map_size());
        let timings = Mode::ALL.map(|mode| time_mode(&eval, mode, &points));
        for t in timings {
            print!("{t:>12.2}");
        }
        for t in &timings[1..] {
            print!("{:>16.3}", timings[0] / t);
        }

        for mode in &Mode::ALL[1..] {
            if let Some((p, s, g)) = first_mismatch(&eval, *mode, &points) {
                println!("\n{mode} not equal at {p:?}: {s:?} vs. {g:?}");
                return ExitCode::FAILURE;
            }
        }
        println!(" ✓");

        size = (size as f64 * STEP_MULTIPLIER) as usize;
    }

    println!("batch backend: {}", Evaluator::new(&Grid::new(0.0, 1.0, 4, 0.0, 1.0, 4)).batch_backend());
    ExitCode::SUCCESS
}
