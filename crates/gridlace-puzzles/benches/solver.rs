//! Benchmarks for the engine solvers.
//!
//! Each benchmark solves puzzles generated up front from fixed seeds, at the
//! difficulty they were generated for:
//!
//! - **`salad_numbers`**: `7n4Bdh`.
//! - **`mathrax`**: `7dt`.
//! - **`spokes`**: `7x7dh`, where every probe runs a full Easy solve.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench solver
//! ```

use std::{hint, str::FromStr as _, time::Duration};

use criterion::{
    BatchSize, BenchmarkId, Criterion, PlottingBackend, criterion_group, criterion_main,
};
use gridlace_core::PuzzleEngine;
use gridlace_generator::{PuzzleGenerator, PuzzleSeed};
use gridlace_puzzles::{Mathrax, Salad, Spokes};

const SEEDS: [&str; 2] = [
    "0f1e2d3c4b5a69788796a5b4c3d2e1f00f1e2d3c4b5a69788796a5b4c3d2e1f0",
    "5555aaaa5555aaaa5555aaaa5555aaaa5555aaaa5555aaaa5555aaaa5555aaaa",
];

fn bench_engine<E: PuzzleEngine>(c: &mut Criterion, name: &str, params: &str) {
    let params = E::Params::from_str(params).unwrap();
    let generator = PuzzleGenerator::<E>::new(params.clone()).unwrap();
    let target = E::difficulty(&params);

    for (i, seed) in SEEDS.into_iter().enumerate() {
        let seed = PuzzleSeed::from_str(seed).unwrap();
        let puzzle = generator.generate_with_seed(seed).unwrap().puzzle;
        c.bench_with_input(
            BenchmarkId::new(name, format!("seed_{i}")),
            &puzzle,
            |b, puzzle| {
                b.iter_batched(
                    || hint::black_box(puzzle.clone()),
                    |puzzle| E::solve(&params, &puzzle, target),
                    BatchSize::SmallInput,
                );
            },
        );
    }
}

fn bench_salad_numbers(c: &mut Criterion) {
    bench_engine::<Salad>(c, "salad_numbers", "7n4Bdh");
}

fn bench_mathrax(c: &mut Criterion) {
    bench_engine::<Mathrax>(c, "mathrax", "7dt");
}

fn bench_spokes(c: &mut Criterion) {
    bench_engine::<Spokes>(c, "spokes", "7x7dh");
}

criterion_group!(
    name = benches;
    config =
        Criterion::default()
            .plotting_backend(PlottingBackend::Plotters)
            .measurement_time(Duration::from_secs(12));
    targets =
        bench_salad_numbers,
        bench_mathrax,
        bench_spokes
);
criterion_main!(benches);
