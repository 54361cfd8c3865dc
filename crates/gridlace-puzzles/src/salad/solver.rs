//! Latin-with-holes solving.
//!
//! Holes are modelled as the extra Latin values `symbols + 1..=order`, so every
//! row and column holds each symbol once and exactly `order - symbols` holes.
//! Which hole value sits in which hole is irrelevant; a grid counts as
//! complete as soon as every symbol is placed.

use gridlace_core::{CandidateSet, Difficulty, Grid, Position, SolveOutcome, SolveReport};
use gridlace_solver::{
    ForcingTier, House, LatinGrid, LatinSolver, LatinTiers, SolverError,
    deduction::{BoxedDeduction, Deduction, SolverContext},
};

use super::{SaladClue, SaladParams, SaladPuzzle, puzzle::border_cells};

/// What is known about a cell being a hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::IsVariant)]
pub enum Hole {
    /// Not decided yet.
    #[default]
    Unknown,
    /// The cell holds a symbol.
    Circle,
    /// The cell is a hole.
    Cross,
}

/// Clue state carried through a Salad solve.
#[derive(Debug, Clone)]
pub(crate) struct SaladContext {
    symbols: u8,
    holes: Grid<Hole>,
    border: Vec<u8>,
}

impl SaladContext {
    fn symbol_mask(&self) -> CandidateSet {
        CandidateSet::full(self.symbols)
    }

    fn hole_mask(&self) -> CandidateSet {
        #[expect(clippy::cast_possible_truncation)]
        let order = self.holes.width() as u8;
        CandidateSet::full(order) - self.symbol_mask()
    }

    fn order(&self) -> usize {
        self.holes.width()
    }

    fn placed_symbol(&self, grid: &LatinGrid, pos: Position) -> Option<u8> {
        grid.value(pos).filter(|&v| v <= self.symbols)
    }
}

impl SolverContext for SaladContext {
    fn is_complete(&self, grid: &LatinGrid) -> bool {
        let symbols = usize::from(self.symbols);
        House::all(self.order())
            .take(self.order())
            .all(|row| {
                row.cells(self.order())
                    .filter(|&pos| self.placed_symbol(grid, pos).is_some())
                    .count()
                    == symbols
            })
    }

    fn is_valid(&self, grid: &LatinGrid) -> bool {
        self.border.iter().enumerate().all(|(i, &clue)| {
            clue == 0
                || border_cells(self.order(), i)
                    .find_map(|pos| self.placed_symbol(grid, pos))
                    == Some(clue)
        })
    }
}

/// Records cells whose candidates settle whether they are holes.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SyncHoles;

impl Deduction<SaladContext> for SyncHoles {
    fn name(&self) -> &'static str {
        "sync holes"
    }

    fn clone_box(&self) -> BoxedDeduction<SaladContext> {
        Box::new(*self)
    }

    fn apply(&self, grid: &mut LatinGrid, ctx: &mut SaladContext) -> Result<bool, SolverError> {
        let symbols = ctx.symbol_mask();
        let holes = ctx.hole_mask();
        let mut changed = false;
        for pos in grid.positions() {
            if !ctx.holes[pos].is_unknown() {
                continue;
            }
            let candidates = grid.candidates(pos);
            let hole = if (candidates & symbols).is_empty() {
                Hole::Cross
            } else if (candidates & holes).is_empty() {
                Hole::Circle
            } else {
                continue;
            };
            log::trace!("sync: {pos} is {hole:?}");
            if let Some(cell) = ctx.holes.get_mut(pos) {
                *cell = hole;
            }
            changed = true;
        }
        Ok(changed)
    }
}

/// Completes rows and columns whose hole or symbol count is reached.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CountHoles;

impl Deduction<SaladContext> for CountHoles {
    fn name(&self) -> &'static str {
        "count holes"
    }

    fn clone_box(&self) -> BoxedDeduction<SaladContext> {
        Box::new(*self)
    }

    fn apply(&self, grid: &mut LatinGrid, ctx: &mut SaladContext) -> Result<bool, SolverError> {
        let order = ctx.order();
        let symbols = usize::from(ctx.symbols);
        let mut changed = false;
        for house in House::all(order) {
            let (crosses, circles) =
                house
                    .cells(order)
                    .fold((0, 0), |(crosses, circles), pos| match ctx.holes[pos] {
                        Hole::Cross => (crosses + 1, circles),
                        Hole::Circle => (crosses, circles + 1),
                        Hole::Unknown => (crosses, circles),
                    });
            let allowed = if crosses == order - symbols {
                ctx.symbol_mask()
            } else if circles == symbols {
                ctx.hole_mask()
            } else {
                continue;
            };
            for pos in house.cells(order) {
                if ctx.holes[pos].is_unknown() {
                    changed |= grid.restrict(pos, allowed);
                }
            }
        }
        Ok(changed)
    }
}

/// Border clue scanning for letters mode.
///
/// Scanning from the clue's edge, every other symbol is ruled out up to the
/// first cell that may hold a symbol. The clue symbol itself is ruled out
/// beyond the nearest circle, and beyond the furthest cell it can reach
/// given the holes left in the line.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct BorderScan;

impl BorderScan {
    fn scan(grid: &mut LatinGrid, ctx: &SaladContext, index: usize, clue: u8) -> bool {
        let order = ctx.order();
        let holes = order - usize::from(ctx.symbols);
        let cells: Vec<Position> = border_cells(order, index).collect();
        let far_crosses = cells[holes..]
            .iter()
            .filter(|&&pos| ctx.holes[pos].is_cross())
            .count();
        let max_dist = holes.saturating_sub(far_crosses);

        let mut changed = false;
        let mut found = false;
        let mut out_of_range = false;
        for (dist, &pos) in cells.iter().enumerate() {
            if !found {
                for v in (1..=ctx.symbols).filter(|&v| v != clue) {
                    changed |= grid.eliminate(pos, v);
                }
            }
            let hole = ctx.holes[pos];
            if !hole.is_cross() {
                found = true;
            }
            if out_of_range {
                changed |= grid.eliminate(pos, clue);
            }
            if hole.is_circle() || dist + 1 > max_dist {
                out_of_range = true;
            }
        }
        changed
    }
}

impl Deduction<SaladContext> for BorderScan {
    fn name(&self) -> &'static str {
        "border scan"
    }

    fn clone_box(&self) -> BoxedDeduction<SaladContext> {
        Box::new(*self)
    }

    fn apply(&self, grid: &mut LatinGrid, ctx: &mut SaladContext) -> Result<bool, SolverError> {
        let mut changed = false;
        for (index, &clue) in ctx.border.iter().enumerate() {
            if clue != 0 {
                changed |= Self::scan(grid, ctx, index, clue);
            }
        }
        Ok(changed)
    }
}

pub(crate) fn solver() -> LatinSolver<SaladContext> {
    LatinSolver::new(LatinTiers {
        simple: Difficulty::Easy,
        set: Some(Difficulty::Hard),
        forcing: Some(ForcingTier {
            tier: Difficulty::Hard,
            sub_tier: Difficulty::Easy,
        }),
        recursive: None,
    })
    .with_rule(Difficulty::Easy, SyncHoles)
    .with_rule(Difficulty::Easy, BorderScan)
    .with_rule(Difficulty::Easy, CountHoles)
}

/// Builds the solver cube and context with every clue applied.
fn setup(
    params: &SaladParams,
    puzzle: &SaladPuzzle,
) -> Result<(LatinGrid, SaladContext), SolverError> {
    let mut grid = LatinGrid::new(params.order);
    let holes = puzzle.grid.map(|clue| match clue {
        SaladClue::Empty => Hole::Unknown,
        SaladClue::Symbol(_) | SaladClue::Circle => Hole::Circle,
        SaladClue::Cross => Hole::Cross,
    });
    let ctx = SaladContext {
        symbols: params.symbol_count(),
        holes,
        border: puzzle.border.clone(),
    };
    for pos in puzzle.grid.positions() {
        match puzzle.grid[pos] {
            SaladClue::Empty => {}
            SaladClue::Symbol(v) => {
                grid.place(pos, v)?;
            }
            SaladClue::Circle => {
                grid.restrict(pos, ctx.symbol_mask());
            }
            SaladClue::Cross => {
                grid.restrict(pos, ctx.hole_mask());
            }
        }
    }
    Ok((grid, ctx))
}

/// Solves a Salad puzzle. The solution holds `0` for holes.
pub(crate) fn solve(
    params: &SaladParams,
    puzzle: &SaladPuzzle,
    max: Difficulty,
) -> SolveReport<Grid<u8>> {
    let Ok((mut grid, mut ctx)) = setup(params, puzzle) else {
        return SolveReport::unsolved(SolveOutcome::Impossible);
    };
    let (outcome, stats) = solver().solve(&mut grid, &mut ctx, max);
    log::trace!("salad {params}: {outcome} after {} steps", stats.total_steps());
    match outcome {
        SolveOutcome::Solved(d) => {
            let solution = grid
                .positions()
                .map(|pos| ctx.placed_symbol(&grid, pos).unwrap_or(0))
                .collect();
            match Grid::from_vec(params.order, params.order, solution) {
                Some(solution) => SolveReport::solved(d, solution),
                None => SolveReport::unsolved(SolveOutcome::Impossible),
            }
        }
        outcome => SolveReport::unsolved(outcome),
    }
}

/// Returns `true` if every hole follows from circles and crosses alone,
/// without placing any symbol.
pub(crate) fn holes_deducible(params: &SaladParams, puzzle: &SaladPuzzle) -> bool {
    let Ok((mut grid, mut ctx)) = setup(params, puzzle) else {
        return false;
    };
    loop {
        let synced = SyncHoles.apply(&mut grid, &mut ctx);
        let counted = CountHoles.apply(&mut grid, &mut ctx);
        match (synced, counted) {
            (Ok(false), Ok(false)) => break,
            (Ok(_), Ok(_)) => {}
            _ => return false,
        }
    }
    let crosses = ctx.holes.iter().filter(|h| h.is_cross()).count();
    crosses == params.holes() * params.order
}
