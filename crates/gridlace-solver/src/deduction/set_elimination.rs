use gridlace_core::{CandidateSet, Position};

use crate::{
    House, LatinGrid, SolverError,
    deduction::{BoxedDeduction, Deduction, SolverContext},
};

/// Naked and hidden subset elimination within rows and columns.
///
/// If `k` open cells of a house share exactly `k` candidates between them,
/// those values are removed from every other cell of the house (naked subset).
/// Dually, if `k` values still missing from a house fit only in `k` cells,
/// those cells are restricted to those values (hidden subset).
///
/// Subsets of size `2..=m/2` are examined, where `m` is the number of open
/// cells in the house; larger subsets are always mirrored by a smaller one of
/// the other kind.
#[derive(Debug, Default, Clone, Copy)]
pub struct SetElimination;

impl SetElimination {
    /// Creates a new `SetElimination` rule.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn naked(grid: &mut LatinGrid, cells: &[Position]) -> Result<bool, SolverError> {
        let m = cells.len();
        for mask in 1_u32..(1 << m) {
            let k = mask.count_ones() as usize;
            if k < 2 || k > m / 2 {
                continue;
            }
            let union = cells
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .fold(CandidateSet::EMPTY, |acc, (_, &pos)| {
                    acc | grid.candidates(pos)
                });
            if union.len() < k {
                return Err(SolverError::Contradiction);
            }
            if union.len() > k {
                continue;
            }
            let mut changed = false;
            for (i, &pos) in cells.iter().enumerate() {
                if mask & (1 << i) == 0 {
                    changed |= grid.restrict(pos, CandidateSet::full(16) - union);
                }
            }
            if changed {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn hidden(grid: &mut LatinGrid, cells: &[Position]) -> Result<bool, SolverError> {
        let missing: Vec<u8> = cells
            .iter()
            .fold(CandidateSet::EMPTY, |acc, &pos| acc | grid.candidates(pos))
            .iter()
            .collect();
        let m = missing.len();
        for mask in 1_u32..(1 << m) {
            let k = mask.count_ones() as usize;
            if k < 2 || k > m / 2 {
                continue;
            }
            let values: CandidateSet = missing
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, &v)| v)
                .collect();
            let holders: Vec<Position> = cells
                .iter()
                .copied()
                .filter(|&pos| !(grid.candidates(pos) & values).is_empty())
                .collect();
            if holders.len() < k {
                return Err(SolverError::Contradiction);
            }
            if holders.len() > k {
                continue;
            }
            let mut changed = false;
            for pos in holders {
                changed |= grid.restrict(pos, values);
            }
            if changed {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl<C: SolverContext + 'static> Deduction<C> for SetElimination {
    fn name(&self) -> &'static str {
        "set elimination"
    }

    fn clone_box(&self) -> BoxedDeduction<C> {
        Box::new(*self)
    }

    fn apply(&self, grid: &mut LatinGrid, _ctx: &mut C) -> Result<bool, SolverError> {
        let order = grid.order();
        for house in House::all(order) {
            let cells: Vec<Position> = house
                .cells(order)
                .filter(|&pos| grid.value(pos).is_none())
                .collect();
            if cells.len() < 4 {
                continue;
            }
            if Self::naked(grid, &cells)? || Self::hidden(grid, &cells)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
