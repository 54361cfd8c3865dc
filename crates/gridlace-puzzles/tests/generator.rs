//! Generated puzzles across every engine: unique solutions, exact
//! difficulty, and solutions that pass the play-state checker.

use gridlace_core::{Difficulty, Grid, Position, PuzzleEngine, SolveOutcome, Status};
use gridlace_game::Game;
use gridlace_generator::{
    GeneratedPuzzle, GeneratorOptions, PuzzleGenerator, PuzzleSeed, Symmetry,
};
use gridlace_puzzles::{Mathrax, Salad, Spokes, salad::SaladClue};
use proptest::prelude::*;

fn generate<E: PuzzleEngine>(params: &str, seed: [u8; 32]) -> GeneratedPuzzle<E> {
    generate_symmetric(params, seed, Symmetry::None)
}

fn generate_symmetric<E: PuzzleEngine>(
    params: &str,
    seed: [u8; 32],
    symmetry: Symmetry,
) -> GeneratedPuzzle<E> {
    let params: E::Params = params.parse().unwrap();
    PuzzleGenerator::<E>::new(params)
        .unwrap()
        .with_options(GeneratorOptions {
            symmetry,
            max_attempts: None,
        })
        .generate_with_seed(PuzzleSeed::new(seed))
        .unwrap()
}

/// The descriptor decodes back to the puzzle, and a full-power solve finds
/// exactly the generated solution without needing more than the target.
fn assert_unique<E: PuzzleEngine>(generated: &GeneratedPuzzle<E>) {
    let params = &generated.params;
    let target = E::difficulty(params);
    assert_eq!(
        E::decode(params, &generated.descriptor).as_ref(),
        Ok(&generated.puzzle)
    );

    let report = E::solve(params, &generated.puzzle, Difficulty::Recursive);
    match report.outcome {
        SolveOutcome::Solved(used) => assert!(used <= target, "{used} > {target}"),
        outcome => panic!("{} {params}: {outcome}", E::NAME),
    }
    assert_eq!(report.solution.as_ref(), Some(&generated.solution));
}

/// The puzzle needs its target tier: the next lower tier cannot finish it.
fn assert_floor<E: PuzzleEngine>(generated: &GeneratedPuzzle<E>) {
    let params = &generated.params;
    let target = E::difficulty(params);
    let lower = target.next_lower(E::difficulties()).unwrap();
    let report = E::solve(params, &generated.puzzle, lower);
    assert!(!report.is_complete(), "{} {params} solves at {lower}", E::NAME);
    assert!(E::solve(params, &generated.puzzle, target).is_complete());
}

/// Loading the solution through the game completes it.
fn assert_solution_checks<E: PuzzleEngine>(generated: &GeneratedPuzzle<E>) {
    let game = Game::from_generated(generated);
    assert_eq!(game.status(), Status::Incomplete);
    let solved = game.solve().unwrap();
    assert_eq!(solved.status(), Status::Complete);
    assert!(solved.is_cheated());
}

/// The cells holding a clue map onto each other under `image`.
fn assert_symmetric<T>(
    grid: &Grid<T>,
    clued: impl Fn(&T) -> bool,
    image: impl Fn(Position) -> Position,
) {
    for pos in grid.positions() {
        assert_eq!(
            clued(&grid[pos]),
            clued(&grid[image(pos)]),
            "{pos} and {} differ",
            image(pos)
        );
    }
}

fn assert_latin(values: &[u8], order: usize) {
    for i in 0..order {
        let mut row: Vec<u8> = (0..order).map(|j| values[i * order + j]).collect();
        let mut column: Vec<u8> = (0..order).map(|j| values[j * order + i]).collect();
        for line in [&mut row, &mut column] {
            line.retain(|&v| v != 0);
            let len = line.len();
            line.sort_unstable();
            line.dedup();
            assert_eq!(line.len(), len, "repeated value in line {i}");
        }
    }
}

#[test]
fn test_salad_letters_unique() {
    let generated = generate::<Salad>("5n3Lde", [11; 32]);
    assert_unique(&generated);
    assert_solution_checks(&generated);
    assert_latin(generated.solution.as_slice(), 5);
    for row in 0..5 {
        let symbols = generated.solution.row(row).iter().filter(|&&v| v != 0).count();
        assert_eq!(symbols, 3);
    }
}

#[test]
fn test_salad_numbers_unique() {
    let generated = generate::<Salad>("6n4Bde", [12; 32]);
    assert_unique(&generated);
    assert_solution_checks(&generated);
}

#[test]
fn test_salad_floor() {
    let generated = generate::<Salad>("5n3Ldh", [13; 32]);
    assert_unique(&generated);
    assert_floor(&generated);
}

#[test]
fn test_salad_numbers_rotational_symmetry() {
    for seed in [[0; 32], [1; 32]] {
        let generated = generate_symmetric::<Salad>("6n4Bde", seed, Symmetry::Rotate2);
        assert_unique(&generated);
        assert_symmetric(
            &generated.puzzle.grid,
            |&clue| clue != SaladClue::Empty,
            |pos| Position::new(5 - pos.x(), 5 - pos.y()),
        );
    }
}

#[test]
fn test_mathrax_unique() {
    let generated = generate::<Mathrax>("4de", [21; 32]);
    assert_unique(&generated);
    assert_solution_checks(&generated);
    assert_latin(generated.solution.as_slice(), 4);
}

#[test]
fn test_mathrax_floor() {
    let generated = generate::<Mathrax>("5dn", [22; 32]);
    assert_unique(&generated);
    assert_floor(&generated);
}

#[test]
fn test_mathrax_tricky_floor() {
    let generated = generate::<Mathrax>("5dt", [23; 32]);
    assert_unique(&generated);
    assert_floor(&generated);
}

#[test]
fn test_mathrax_mirror_symmetry() {
    let generated = generate_symmetric::<Mathrax>("5de", [24; 32], Symmetry::Horizontal);
    assert_unique(&generated);
    assert_symmetric(
        &generated.puzzle.grid,
        |&digit| digit != 0,
        |pos| Position::new(4 - pos.x(), pos.y()),
    );
}

#[test]
fn test_spokes_unique() {
    let generated = generate::<Spokes>("4x4de", [31; 32]);
    assert_unique(&generated);
    assert_solution_checks(&generated);
}

#[test]
fn test_spokes_floor() {
    let generated = generate::<Spokes>("4x4dt", [32; 32]);
    assert_unique(&generated);
    assert_floor(&generated);
}

#[test]
fn test_spokes_hard_floor() {
    let generated = generate::<Spokes>("4x4dh", [33; 32]);
    assert_unique(&generated);
    assert_floor(&generated);
}

#[test]
fn test_seed_reproduces_puzzle() {
    let a = generate::<Mathrax>("4de", [5; 32]);
    let b = generate::<Mathrax>("4de", [5; 32]);
    assert_eq!(a.descriptor, b.descriptor);
    assert_eq!(a.attempts, b.attempts);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn test_mathrax_solutions_are_sound(seed in any::<[u8; 32]>()) {
        let generated = generate::<Mathrax>("4de", seed);
        assert_latin(generated.solution.as_slice(), 4);
        assert_solution_checks(&generated);
    }

    #[test]
    fn test_salad_solutions_are_sound(seed in any::<[u8; 32]>()) {
        let generated = generate::<Salad>("5n3Bde", seed);
        assert_latin(generated.solution.as_slice(), 5);
        assert_solution_checks(&generated);
    }

    #[test]
    fn test_spokes_solutions_are_sound(seed in any::<[u8; 32]>()) {
        let generated = generate::<Spokes>("3x3de", seed);
        assert_solution_checks(&generated);
    }
}
