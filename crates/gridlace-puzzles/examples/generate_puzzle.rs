//! Example generating a puzzle with any of the engines.
//!
//! This example shows how to:
//! - Create a `PuzzleGenerator` for an engine and a params string
//! - Generate a random puzzle and print it with its seed and solution
//! - Sample many puzzles in parallel and keep the one with the fewest clues
//!
//! # Usage
//!
//! ```sh
//! cargo run --example generate_puzzle -- mathrax 6dt
//! ```
//!
//! Keep the sparsest of 200 Spokes puzzles with rotational symmetry:
//!
//! ```sh
//! cargo run --example generate_puzzle -- spokes 7x7dh --samples 200 --symmetry rotate2
//! ```

use std::process;

use clap::{Parser, ValueEnum};
use gridlace_core::{PuzzleEngine, Status};
use gridlace_game::Game;
use gridlace_generator::{GeneratedPuzzle, GeneratorOptions, PuzzleGenerator, Symmetry};
use gridlace_puzzles::{Mathrax, Salad, Spokes};
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EngineKind {
    Salad,
    Mathrax,
    Spokes,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Puzzle engine.
    engine: EngineKind,

    /// Params string, e.g. `5n3Lde`, `6dt` or `7x7dh`.
    params: String,

    /// Number of puzzles to sample; the sparsest one is printed.
    #[arg(long, value_name = "COUNT", default_value_t = 1)]
    samples: usize,

    /// Symmetry of the remaining clues.
    #[arg(long, default_value = "none")]
    symmetry: Symmetry,
}

fn main() {
    let args = Args::parse();
    if args.samples == 0 {
        eprintln!("--samples must be at least 1.");
        process::exit(1);
    }
    match args.engine {
        EngineKind::Salad => run::<Salad>(&args),
        EngineKind::Mathrax => run::<Mathrax>(&args),
        EngineKind::Spokes => run::<Spokes>(&args),
    }
}

fn run<E: PuzzleEngine>(args: &Args) {
    let params = match args.params.parse::<E::Params>() {
        Ok(params) => params,
        Err(err) => {
            eprintln!("Invalid params {:?}: {err}", args.params);
            process::exit(2);
        }
    };
    let generator = match PuzzleGenerator::<E>::new(params) {
        Ok(generator) => generator.with_options(GeneratorOptions {
            symmetry: args.symmetry,
            max_attempts: None,
        }),
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    };

    let best = (0..args.samples)
        .into_par_iter()
        .filter_map(|_| generator.generate().ok())
        .min_by_key(|puzzle| clue_count(&puzzle.descriptor));

    let Some(puzzle) = best else {
        eprintln!("No puzzle could be generated.");
        process::exit(1);
    };
    print_puzzle(&puzzle, args.samples);
}

/// Counts the characters of a descriptor that are not run-length gaps.
fn clue_count(descriptor: &str) -> usize {
    descriptor
        .chars()
        .filter(|c| !c.is_ascii_lowercase() && *c != ',')
        .count()
}

fn print_puzzle<E: PuzzleEngine>(puzzle: &GeneratedPuzzle<E>, samples: usize) {
    println!("Seed:");
    println!("  {}", puzzle.seed);
    println!();

    if samples > 1 {
        println!("Selection:");
        println!("  Samples: {samples}");
        println!("  Clues: {}", clue_count(&puzzle.descriptor));
        println!();
    }

    println!("Puzzle:");
    println!("  {}:{}", puzzle.params, puzzle.descriptor);
    println!("  attempts: {}", puzzle.attempts);
    println!();

    let game = Game::from_generated(puzzle);
    println!("{}", game.text());

    if let Ok(solved) = game.solve()
        && solved.status() == Status::Complete
    {
        println!("Solution:");
        println!("{}", solved.text());
    }
}
