use gridlace_core::Position;

use crate::{
    House, LatinGrid, SolverError,
    deduction::{BoxedDeduction, Deduction, SolverContext},
};

/// Places naked and hidden singles.
///
/// A naked single is an open cell with exactly one candidate left. A hidden
/// single is a value that fits in only one open cell of a row or column. All
/// naked singles found in one pass are placed together; hidden singles are
/// only looked for when no naked single exists.
///
/// # Examples
///
/// ```
/// use gridlace_core::Position;
/// use gridlace_solver::{LatinGrid, deduction::{Deduction, Singles}};
///
/// let mut grid = LatinGrid::from_values(3, &[1, 2, 0, 0, 0, 0, 0, 0, 0])?;
/// assert!(Singles::new().apply(&mut grid, &mut ())?);
/// assert_eq!(grid.value(Position::new(2, 0)), Some(3));
/// # Ok::<(), gridlace_solver::SolverError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Singles;

impl Singles {
    /// Creates a new `Singles` rule.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn naked(grid: &mut LatinGrid) -> Result<bool, SolverError> {
        let mut changed = false;
        for pos in grid.positions() {
            if grid.value(pos).is_some() {
                continue;
            }
            if let Some(v) = grid.candidates(pos).as_single() {
                changed |= grid.place(pos, v)?;
            }
        }
        Ok(changed)
    }

    fn hidden(grid: &mut LatinGrid) -> Result<bool, SolverError> {
        let order = grid.order();
        for house in House::all(order) {
            for value in 1..=order {
                #[expect(clippy::cast_possible_truncation)]
                let value = value as u8;
                let mut found: Option<Position> = None;
                let mut count = 0;
                for pos in house.cells(order) {
                    if grid.candidates(pos).contains(value) {
                        count += 1;
                        found = Some(pos);
                    }
                }
                match (count, found) {
                    (0, _) => return Err(SolverError::Contradiction),
                    (1, Some(pos)) if grid.value(pos).is_none() => {
                        grid.place(pos, value)?;
                        return Ok(true);
                    }
                    _ => {}
                }
            }
        }
        Ok(false)
    }
}

impl<C: SolverContext + 'static> Deduction<C> for Singles {
    fn name(&self) -> &'static str {
        "singles"
    }

    fn clone_box(&self) -> BoxedDeduction<C> {
        Box::new(*self)
    }

    fn apply(&self, grid: &mut LatinGrid, _ctx: &mut C) -> Result<bool, SolverError> {
        if Self::naked(grid)? {
            return Ok(true);
        }
        Self::hidden(grid)
    }
}
