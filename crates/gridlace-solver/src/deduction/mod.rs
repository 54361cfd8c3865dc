//! Deduction rules for Latin-square solving.
//!
//! Each rule implements the [`Deduction`] trait and is run against a
//! [`LatinGrid`] together with an engine-specific [`SolverContext`] carrying the
//! clues the Latin constraint alone does not know about.

use std::fmt::Debug;

pub use self::{set_elimination::SetElimination, singles::Singles};
use crate::{LatinGrid, SolverError};

mod set_elimination;
mod singles;

/// Engine-specific data carried alongside a [`LatinGrid`].
///
/// The context is cloned together with the grid whenever the solver explores
/// a hypothesis, so rules may keep mutable bookkeeping in it.
pub trait SolverContext: Clone + Debug + Send + Sync {
    /// Returns `true` once `grid` holds everything the puzzle asks for.
    ///
    /// Defaults to every cell being placed. Engines whose solution leaves
    /// some Latin values interchangeable may stop earlier.
    fn is_complete(&self, grid: &LatinGrid) -> bool {
        grid.is_solved()
    }

    /// Final check run on a complete grid.
    ///
    /// A complete grid for which this returns `false` is treated as a
    /// contradiction.
    fn is_valid(&self, grid: &LatinGrid) -> bool {
        let _ = grid;
        true
    }
}

impl SolverContext for () {}

/// A deduction rule over a [`LatinGrid`].
pub trait Deduction<C>: Debug + Send + Sync {
    /// Returns the name of the rule.
    fn name(&self) -> &'static str;

    /// Returns a boxed clone of the rule.
    fn clone_box(&self) -> BoxedDeduction<C>;

    /// Applies the rule.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The grid or the context was updated
    /// * `Ok(false)` - The rule found nothing to do
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Contradiction`] if the rule proves the grid has
    /// no consistent completion.
    fn apply(&self, grid: &mut LatinGrid, ctx: &mut C) -> Result<bool, SolverError>;
}

/// A boxed deduction rule.
pub type BoxedDeduction<C> = Box<dyn Deduction<C>>;

impl<C> Clone for BoxedDeduction<C> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
