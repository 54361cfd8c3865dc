//! Benchmarks for puzzle generation.
//!
//! - **`salad_letters`**: `6n4Ldh`, border clues at Hard.
//! - **`mathrax`**: `6dt`, every clue type at Tricky.
//! - **`spokes`**: `6x6dt`.
//!
//! # Test Data
//!
//! Uses three fixed seeds, so every run generates the same puzzles:
//!
//! - **`seed_0`**: `c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1`
//! - **`seed_1`**: `a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b1c2d3e4f5a6b7c8d9e0f1a2b3`
//! - **`seed_2`**: `1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef`
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench generator
//! ```

use std::{hint, str::FromStr as _, time::Duration};

use criterion::{
    BatchSize, BenchmarkId, Criterion, PlottingBackend, criterion_group, criterion_main,
};
use gridlace_core::PuzzleEngine;
use gridlace_generator::{PuzzleGenerator, PuzzleSeed};
use gridlace_puzzles::{Mathrax, Salad, Spokes};

const SEEDS: [&str; 3] = [
    "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1",
    "a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b1c2d3e4f5a6b7c8d9e0f1a2b3",
    "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef",
];

fn bench_engine<E: PuzzleEngine>(c: &mut Criterion, name: &str, params: &str) {
    let params = E::Params::from_str(params).unwrap();
    let generator = PuzzleGenerator::<E>::new(params).unwrap();

    for (i, seed) in SEEDS.into_iter().enumerate() {
        let seed = PuzzleSeed::from_str(seed).unwrap();
        c.bench_with_input(
            BenchmarkId::new(name, format!("seed_{i}")),
            &seed,
            |b, seed| {
                b.iter_batched(
                    || hint::black_box(*seed),
                    |seed| generator.generate_with_seed(seed),
                    BatchSize::SmallInput,
                );
            },
        );
    }
}

fn bench_salad_letters(c: &mut Criterion) {
    bench_engine::<Salad>(c, "salad_letters", "6n4Ldh");
}

fn bench_mathrax(c: &mut Criterion) {
    bench_engine::<Mathrax>(c, "mathrax", "6dt");
}

fn bench_spokes(c: &mut Criterion) {
    bench_engine::<Spokes>(c, "spokes", "6x6dt");
}

criterion_group!(
    name = benches;
    config =
        Criterion::default()
            .plotting_backend(PlottingBackend::Plotters)
            .measurement_time(Duration::from_secs(12));
    targets =
        bench_salad_letters,
        bench_mathrax,
        bench_spokes
);
criterion_main!(benches);
