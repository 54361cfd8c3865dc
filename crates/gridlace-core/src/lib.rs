//! Core data types shared by the gridlace puzzle engines.
//!
//! This crate holds everything the engines and the generic generator, solver,
//! and game crates have in common:
//!
//! - [`Difficulty`], [`SolveOutcome`] and [`Status`], the ordered vocabulary of
//!   solving and validation;
//! - [`CandidateSet`], a bitmask of small cell values used both as pencil marks
//!   and as solver candidates;
//! - [`Grid`] and [`Position`], dense row-major storage;
//! - [`DisjointSet`], a union-find forest for connectivity checks;
//! - [`run_length`], the descriptor run-length scheme;
//! - the error taxonomies [`ParamsError`], [`DescriptorError`] and
//!   [`MoveError`];
//! - [`PresetCatalog`] and the [`PuzzleEngine`] trait.
//!
//! # Examples
//!
//! ```
//! use gridlace_core::{CandidateSet, Difficulty, Grid, Position};
//!
//! let mut marks = Grid::new(4, 4, CandidateSet::full(4));
//! marks[Position::new(1, 2)].remove(3);
//!
//! assert_eq!(marks[Position::new(1, 2)].len(), 3);
//! assert!(Difficulty::Easy < Difficulty::Recursive);
//! ```

pub use self::{
    candidate_set::{CandidateSet, Iter as CandidateIter},
    difficulty::{Difficulty, SolveOutcome, Status},
    dsf::DisjointSet,
    engine::{CellFlags, ClueLayer, ClueSlot, PuzzleEngine, PuzzleRng, SolveReport},
    error::{DescriptorError, MoveError, ParamsError},
    grid::{Grid, Position},
    preset::{Preset, PresetCatalog},
};

mod candidate_set;
mod difficulty;
mod dsf;
mod engine;
mod error;
mod grid;
mod preset;
pub mod run_length;
