//! Test utilities for deduction rules.
//!
//! This module provides [`LatinTester`], a fluent harness for checking that a
//! [`Deduction`] places and removes exactly what it should.
//!
//! # Example
//!
//! ```
//! use gridlace_core::Position;
//! use gridlace_solver::{deduction::Singles, testing::LatinTester};
//!
//! LatinTester::from_str(
//!     "
//!     12_
//!     ___
//!     ___
//! ",
//! )
//! .apply_once(&Singles::new())
//! .assert_placed(Position::new(2, 0), 3);
//! ```

use gridlace_core::{CandidateSet, Position};

use crate::{
    LatinGrid, SolverError,
    deduction::{Deduction, SolverContext},
};

/// A test harness for verifying deduction rules.
///
/// `LatinTester` keeps the initial and the current state of a grid so that
/// assertions can talk about what a rule changed.
///
/// # Panics
///
/// All assertion methods panic with detailed messages on failure, using
/// `#[track_caller]` to report the correct source location.
#[derive(Debug)]
pub struct LatinTester<C = ()> {
    initial: LatinGrid,
    current: LatinGrid,
    ctx: C,
}

impl LatinTester<()> {
    /// Creates a tester from an initial grid state.
    #[must_use]
    pub fn new(initial: LatinGrid) -> Self {
        let current = initial.clone();
        Self {
            initial,
            current,
            ctx: (),
        }
    }

    /// Creates a tester from a grid string.
    ///
    /// Each non-blank line is a row. `1`-`9` and `A`-`G` (10-16) are placed
    /// values; `_`, `.` and `0` are open cells. Whitespace is ignored.
    ///
    /// # Panics
    ///
    /// Panics if the rows are not square or the values conflict.
    #[track_caller]
    pub fn from_str(s: &str) -> Self {
        let rows: Vec<Vec<u8>> = s
            .lines()
            .map(|line| {
                line.chars()
                    .filter(|c| !c.is_whitespace())
                    .map(parse_cell)
                    .collect::<Vec<_>>()
            })
            .filter(|row| !row.is_empty())
            .collect();
        let order = rows.len();
        assert!(
            rows.iter().all(|row| row.len() == order),
            "grid string is not square: {rows:?}"
        );
        let values: Vec<u8> = rows.into_iter().flatten().collect();
        let grid = LatinGrid::from_values(order, &values)
            .unwrap_or_else(|e| panic!("conflicting grid string: {e}"));
        Self::new(grid)
    }
}

#[track_caller]
fn parse_cell(c: char) -> u8 {
    match c {
        '_' | '.' | '0' => 0,
        '1'..='9' | 'A'..='G' => c
            .to_digit(17)
            .and_then(|v| u8::try_from(v).ok())
            .unwrap_or_default(),
        _ => panic!("invalid cell character: {c:?}"),
    }
}

impl<C: SolverContext> LatinTester<C> {
    /// Replaces the solver context.
    #[must_use]
    pub fn with_context<D: SolverContext>(self, ctx: D) -> LatinTester<D> {
        LatinTester {
            initial: self.initial,
            current: self.current,
            ctx,
        }
    }

    /// Returns the current grid.
    #[must_use]
    pub fn grid(&self) -> &LatinGrid {
        &self.current
    }

    /// Returns the current context.
    #[must_use]
    pub fn context(&self) -> &C {
        &self.ctx
    }

    /// Applies `rule` once.
    ///
    /// # Panics
    ///
    /// Panics if the rule reports a contradiction.
    #[track_caller]
    pub fn apply_once<R>(mut self, rule: &R) -> Self
    where
        R: Deduction<C> + ?Sized,
    {
        if let Err(e) = rule.apply(&mut self.current, &mut self.ctx) {
            panic!("{} failed: {e}", rule.name());
        }
        self
    }

    /// Applies `rule` until it makes no more progress.
    ///
    /// # Panics
    ///
    /// Panics if the rule reports a contradiction.
    #[track_caller]
    pub fn apply_until_stuck<R>(mut self, rule: &R) -> Self
    where
        R: Deduction<C> + ?Sized,
    {
        loop {
            match rule.apply(&mut self.current, &mut self.ctx) {
                Ok(true) => {}
                Ok(false) => return self,
                Err(e) => panic!("{} failed: {e}", rule.name()),
            }
        }
    }

    /// Asserts that applying `rule` reports a contradiction.
    ///
    /// # Panics
    ///
    /// Panics if the rule succeeds.
    #[track_caller]
    pub fn assert_contradiction<R>(mut self, rule: &R)
    where
        R: Deduction<C> + ?Sized,
    {
        let result = rule.apply(&mut self.current, &mut self.ctx);
        assert_eq!(
            result,
            Err(SolverError::Contradiction),
            "{} did not find a contradiction",
            rule.name()
        );
    }

    /// Asserts that `value` was placed at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if the cell holds a different value or none.
    #[track_caller]
    pub fn assert_placed(self, pos: Position, value: u8) -> Self {
        assert_eq!(
            self.current.value(pos),
            Some(value),
            "expected {value} at {pos}, candidates {:?}",
            self.current.candidates(pos)
        );
        self
    }

    /// Asserts that every value in `values` was removed from `pos`.
    ///
    /// # Panics
    ///
    /// Panics if a value was not a candidate initially or is still one.
    #[track_caller]
    pub fn assert_removed_includes<I>(self, pos: Position, values: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        let before = self.initial.candidates(pos);
        let after = self.current.candidates(pos);
        for v in values {
            assert!(
                before.contains(v) && !after.contains(v),
                "expected {v} removed at {pos}: before {before:?}, after {after:?}"
            );
        }
        self
    }

    /// Asserts that the candidates at `pos` are exactly `values`.
    ///
    /// # Panics
    ///
    /// Panics if the sets differ.
    #[track_caller]
    pub fn assert_candidates<I>(self, pos: Position, values: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        let expected: CandidateSet = values.into_iter().collect();
        assert_eq!(
            self.current.candidates(pos),
            expected,
            "unexpected candidates at {pos}"
        );
        self
    }

    /// Asserts that the cell at `pos` did not change.
    ///
    /// # Panics
    ///
    /// Panics if its candidates or value differ from the initial state.
    #[track_caller]
    pub fn assert_no_change(self, pos: Position) -> Self {
        assert_eq!(
            self.initial.candidates(pos),
            self.current.candidates(pos),
            "candidates at {pos} changed"
        );
        assert_eq!(self.initial.value(pos), self.current.value(pos));
        self
    }
}
