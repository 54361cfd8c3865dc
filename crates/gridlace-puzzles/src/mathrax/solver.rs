use gridlace_core::{Difficulty, Grid, Position, SolveOutcome, SolveReport};
use gridlace_solver::{
    ForcingTier, LatinGrid, LatinSolver, LatinTiers, SolverError,
    deduction::{BoxedDeduction, Deduction, SolverContext},
};

use super::{MathraxClue, MathraxParams, MathraxPuzzle, puzzle::clues_around};

/// Intersection clues carried through a Mathrax solve.
#[derive(Debug, Clone)]
pub(crate) struct MathraxContext {
    clues: Grid<MathraxClue>,
}

impl SolverContext for MathraxContext {
    fn is_valid(&self, grid: &LatinGrid) -> bool {
        let value = |x, y| grid.value(Position::new(x, y)).unwrap_or(0);
        self.clues.positions().all(|pos| {
            let (x, y) = (pos.x(), pos.y());
            let clue = self.clues[pos];
            clue.allows(value(x, y), value(x + 1, y + 1))
                && clue.allows(value(x + 1, y), value(x, y + 1))
        })
    }
}

/// Narrows each cell to the values its intersection clues allow given the
/// candidates of the diagonal partners.
///
/// The strength depends on the tier the rule is registered at:
///
/// - **Easy**: arithmetic clues only count once the partner is down to a
///   single value, and a cell is only touched if it collapses to one value.
/// - **Normal**: every partner counts, still only collapsing cells.
/// - **Tricky** and above: any narrowing is applied.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DiagonalClues {
    tier: Difficulty,
}

impl DiagonalClues {
    pub(crate) const fn new(tier: Difficulty) -> Self {
        Self { tier }
    }
}

impl Deduction<MathraxContext> for DiagonalClues {
    fn name(&self) -> &'static str {
        match self.tier {
            Difficulty::Easy => "diagonal clues (placed partners)",
            Difficulty::Normal => "diagonal clues (collapsing)",
            _ => "diagonal clues",
        }
    }

    fn clone_box(&self) -> BoxedDeduction<MathraxContext> {
        Box::new(*self)
    }

    fn apply(&self, grid: &mut LatinGrid, ctx: &mut MathraxContext) -> Result<bool, SolverError> {
        let simple = self.tier == Difficulty::Easy;
        let collapse_only = self.tier <= Difficulty::Normal;
        let mut changed = false;
        for pos in grid.positions() {
            let allowed = clues_around(&ctx.clues, pos).fold(
                grid.candidates(pos),
                |allowed, (clue, partner, _)| {
                    allowed & clue.options(grid.candidates(partner), simple)
                },
            );
            if allowed.is_empty() {
                log::trace!("diagonal clues: nothing fits at {pos}");
                return Err(SolverError::Contradiction);
            }
            if collapse_only && allowed.len() > 1 {
                continue;
            }
            changed |= grid.restrict(pos, allowed);
        }
        Ok(changed)
    }
}

pub(crate) fn solver() -> LatinSolver<MathraxContext> {
    LatinSolver::new(LatinTiers {
        simple: Difficulty::Easy,
        set: Some(Difficulty::Normal),
        forcing: Some(ForcingTier {
            tier: Difficulty::Tricky,
            sub_tier: Difficulty::Normal,
        }),
        recursive: Some(Difficulty::Recursive),
    })
    .with_rule(Difficulty::Easy, DiagonalClues::new(Difficulty::Easy))
    .with_rule(Difficulty::Normal, DiagonalClues::new(Difficulty::Normal))
    .with_rule(Difficulty::Tricky, DiagonalClues::new(Difficulty::Tricky))
}

pub(crate) fn solve(
    params: &MathraxParams,
    puzzle: &MathraxPuzzle,
    max: Difficulty,
) -> SolveReport<Grid<u8>> {
    let Ok(mut grid) = LatinGrid::from_values(params.order, puzzle.grid.as_slice()) else {
        return SolveReport::unsolved(SolveOutcome::Impossible);
    };
    let mut ctx = MathraxContext {
        clues: puzzle.clues.clone(),
    };
    let (outcome, stats) = solver().solve(&mut grid, &mut ctx, max);
    log::trace!("mathrax {params}: {outcome} after {} steps", stats.total_steps());
    match outcome {
        SolveOutcome::Solved(d) => {
            match Grid::from_vec(params.order, params.order, grid.values().to_vec()) {
                Some(solution) => SolveReport::solved(d, solution),
                None => SolveReport::unsolved(SolveOutcome::Impossible),
            }
        }
        outcome => SolveReport::unsolved(outcome),
    }
}
