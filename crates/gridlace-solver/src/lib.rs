//! Tiered Latin-square solver shared by the gridlace engines.
//!
//! The solver works on a [`LatinGrid`], a cube of candidates where every
//! value appears once per row and column. It runs [`Deduction`] rules grouped
//! by [`Difficulty`](gridlace_core::Difficulty) tier, then falls back to
//! hypothesis testing and recursive search as allowed by [`LatinTiers`].
//! Engines plug their clue logic in as extra rules and carry clue state in a
//! [`SolverContext`](deduction::SolverContext).
//!
//! [`find_refutation`] is the generic "assume, propagate, contradict" step.
//! The Latin solver uses it for forcing and engines without a Latin grid use it
//! directly.
//!
//! [`Deduction`]: deduction::Deduction

pub use self::{contradiction::*, error::*, latin_grid::*, latin_solver::*};

mod contradiction;
pub mod deduction;
mod error;
mod latin_grid;
mod latin_solver;
pub mod testing;
