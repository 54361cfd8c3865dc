//! Generic puzzle generation for gridlace engines.
//!
//! [`PuzzleGenerator`] drives any [`PuzzleEngine`](gridlace_core::PuzzleEngine)
//! through the same loop:
//!
//! 1. **Seed**: the engine builds a fully clued draft from a random solution.
//! 2. **Strip**: clue slots are weakened in random order, grouped into
//!    [`Symmetry`] orbits, keeping each weakening only while the puzzle still
//!    solves at the target difficulty.
//! 3. **Floor**: a puzzle that already solves at the next lower tier is
//!    discarded.
//!
//! Every attempt draws its randomness from a [`PuzzleSeed`] and the attempt
//! number, so a seed reproduces the whole run.
//!
//! [`random_latin_square`] fills a random Latin square for engines that need
//! one.

pub use self::{error::*, generator::*, latin_fill::*, seed::*, symmetry::*};

mod error;
mod generator;
mod latin_fill;
mod seed;
mod symmetry;
