use gridlace_core::{Difficulty, Position, SolveOutcome};

use crate::{
    LatinGrid, SolverError,
    contradiction::find_refutation,
    deduction::{BoxedDeduction, Deduction, SetElimination, Singles, SolverContext},
};

/// Hypothesis testing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForcingTier {
    /// The tier credited when forcing makes progress.
    pub tier: Difficulty,
    /// The cap of the sub-solver run under each hypothesis.
    pub sub_tier: Difficulty,
}

/// The tier assigned to each built-in stage of the Latin solver.
///
/// A stage set to `None` is disabled. Stages whose tier exceeds the cap of a
/// solve call are skipped for that call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatinTiers {
    /// Tier of [`Singles`].
    pub simple: Difficulty,
    /// Tier of [`SetElimination`].
    pub set: Option<Difficulty>,
    /// Tier of hypothesis testing by contradiction.
    pub forcing: Option<ForcingTier>,
    /// Tier of recursive search. Recursion counts solutions, so it is the only
    /// stage that can report [`SolveOutcome::Ambiguous`].
    pub recursive: Option<Difficulty>,
}

/// Statistics collected during a Latin solve.
///
/// # Examples
///
/// ```
/// use gridlace_core::Difficulty;
/// use gridlace_solver::{LatinGrid, LatinSolver, LatinTiers};
///
/// let solver = LatinSolver::<()>::new(LatinTiers {
///     simple: Difficulty::Easy,
///     set: None,
///     forcing: None,
///     recursive: None,
/// });
/// let mut grid = LatinGrid::from_values(3, &[1, 2, 0, 0, 0, 0, 0, 0, 0])?;
/// let (_outcome, stats) = solver.solve(&mut grid, &mut (), Difficulty::Easy);
///
/// for (i, count) in stats.applications().iter().enumerate() {
///     println!("{}: {count} times", solver.rules()[i].name());
/// }
/// # Ok::<(), gridlace_solver::SolverError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatinSolverStats {
    applications: Vec<usize>,
    forcing: usize,
    branches: usize,
    total_steps: usize,
}

impl LatinSolverStats {
    /// Returns rule application counts in solver order.
    #[must_use]
    pub fn applications(&self) -> &[usize] {
        &self.applications
    }

    /// Returns the number of eliminations proved by contradiction.
    #[must_use]
    pub fn forcing(&self) -> usize {
        self.forcing
    }

    /// Returns the number of recursive branches explored.
    #[must_use]
    pub fn branches(&self) -> usize {
        self.branches
    }

    /// Returns the total number of solving steps taken.
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Returns `true` if any step was applied.
    #[must_use]
    pub fn has_progress(&self) -> bool {
        self.total_steps > 0
    }
}

/// A tiered solver for Latin-square-based puzzles.
///
/// The solver repeatedly applies the first rule, in tier order, that makes
/// progress and restarts from the top afterwards. When no rule applies it
/// falls back to hypothesis testing, then to recursive search, as far as the
/// configured [`LatinTiers`] and the difficulty cap allow. The reported
/// difficulty is the highest tier that was actually needed.
///
/// Engines add their own clue rules with [`with_rule`](Self::with_rule); the
/// clue state lives in the solver context `C`.
///
/// # Examples
///
/// ```
/// use gridlace_core::{Difficulty, SolveOutcome};
/// use gridlace_solver::{LatinGrid, LatinSolver, LatinTiers};
///
/// let solver = LatinSolver::<()>::new(LatinTiers {
///     simple: Difficulty::Easy,
///     set: Some(Difficulty::Normal),
///     forcing: None,
///     recursive: Some(Difficulty::Recursive),
/// });
///
/// let mut grid = LatinGrid::from_values(3, &[1, 2, 0, 0, 0, 0, 0, 0, 0])?;
/// let (outcome, _) = solver.solve(&mut grid, &mut (), Difficulty::Recursive);
/// assert_eq!(outcome, SolveOutcome::Ambiguous);
///
/// let mut grid = LatinGrid::from_values(3, &[1, 2, 0, 2, 0, 0, 0, 0, 0])?;
/// let (outcome, _) = solver.solve(&mut grid, &mut (), Difficulty::Recursive);
/// assert_eq!(outcome, SolveOutcome::Solved(Difficulty::Easy));
/// assert!(grid.is_solved());
/// # Ok::<(), gridlace_solver::SolverError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LatinSolver<C> {
    tiers: LatinTiers,
    rules: Vec<(Difficulty, BoxedDeduction<C>)>,
}

impl<C: SolverContext + 'static> LatinSolver<C> {
    /// Creates a solver with the built-in rules enabled by `tiers`.
    #[must_use]
    pub fn new(tiers: LatinTiers) -> Self {
        let mut solver = Self {
            tiers,
            rules: vec![],
        };
        solver = solver.with_rule(tiers.simple, Singles::new());
        if let Some(tier) = tiers.set {
            solver = solver.with_rule(tier, SetElimination::new());
        }
        solver
    }

    /// Adds an engine rule at `tier`.
    ///
    /// Rules run in tier order; among rules of the same tier, earlier
    /// additions run first.
    #[must_use]
    pub fn with_rule<R>(mut self, tier: Difficulty, rule: R) -> Self
    where
        R: Deduction<C> + 'static,
    {
        let index = self.rules.partition_point(|(t, _)| *t <= tier);
        self.rules.insert(index, (tier, Box::new(rule)));
        self
    }

    /// Returns the configured tiers.
    #[must_use]
    pub fn tiers(&self) -> LatinTiers {
        self.tiers
    }

    /// Returns the rules in application order.
    ///
    /// The returned slice defines the index mapping used by
    /// [`LatinSolverStats::applications`].
    #[must_use]
    pub fn rules(&self) -> Vec<&dyn Deduction<C>> {
        self.rules.iter().map(|(_, rule)| rule.as_ref()).collect()
    }

    /// Creates a statistics object aligned with this solver's rule order.
    #[must_use]
    pub fn new_stats(&self) -> LatinSolverStats {
        LatinSolverStats {
            applications: vec![0; self.rules.len()],
            forcing: 0,
            branches: 0,
            total_steps: 0,
        }
    }

    /// Applies the first rule with tier at most `max` that makes progress.
    ///
    /// Returns the tier of the applied rule, or `None` if no rule applies.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Contradiction`] if the grid is or becomes
    /// inconsistent.
    pub fn step(
        &self,
        grid: &mut LatinGrid,
        ctx: &mut C,
        max: Difficulty,
        stats: &mut LatinSolverStats,
    ) -> Result<Option<Difficulty>, SolverError> {
        debug_assert_eq!(self.rules.len(), stats.applications.len());
        grid.check_consistency()?;

        for (i, (tier, rule)) in self.rules.iter().enumerate() {
            if *tier > max {
                continue;
            }
            if rule.apply(grid, ctx)? {
                stats.applications[i] += 1;
                stats.total_steps += 1;
                grid.check_consistency()?;
                return Ok(Some(*tier));
            }
        }
        Ok(None)
    }

    /// Solves `grid` using stages up to `max`.
    ///
    /// On [`SolveOutcome::Solved`], `grid` and `ctx` hold the solution. On any
    /// other outcome their contents are unspecified.
    pub fn solve(
        &self,
        grid: &mut LatinGrid,
        ctx: &mut C,
        max: Difficulty,
    ) -> (SolveOutcome, LatinSolverStats) {
        let mut stats = self.new_stats();
        let outcome = self.solve_with_stats(grid, ctx, max, &mut stats);
        (outcome, stats)
    }

    /// Like [`solve`](Self::solve), accumulating into an existing statistics
    /// object.
    pub fn solve_with_stats(
        &self,
        grid: &mut LatinGrid,
        ctx: &mut C,
        max: Difficulty,
        stats: &mut LatinSolverStats,
    ) -> SolveOutcome {
        match self.run(grid, ctx, max, stats) {
            Ok(outcome) => outcome,
            Err(SolverError::Contradiction) => SolveOutcome::Impossible,
        }
    }

    fn run(
        &self,
        grid: &mut LatinGrid,
        ctx: &mut C,
        max: Difficulty,
        stats: &mut LatinSolverStats,
    ) -> Result<SolveOutcome, SolverError> {
        let mut achieved = self.tiers.simple;
        loop {
            grid.check_consistency()?;
            if ctx.is_complete(grid) {
                if !ctx.is_valid(grid) {
                    return Err(SolverError::Contradiction);
                }
                return Ok(SolveOutcome::Solved(achieved));
            }

            if let Some(tier) = self.step(grid, ctx, max, stats)? {
                achieved = achieved.max(tier);
                continue;
            }

            if let Some(forcing) = self.tiers.forcing
                && forcing.tier <= max
                && self.force(grid, ctx, forcing.sub_tier)
            {
                stats.forcing += 1;
                stats.total_steps += 1;
                achieved = achieved.max(forcing.tier);
                continue;
            }

            if let Some(recursive) = self.tiers.recursive
                && recursive <= max
            {
                return match self.branch(grid, ctx, max, stats)? {
                    SolveOutcome::Solved(d) => Ok(SolveOutcome::Solved(achieved.max(d))),
                    outcome => Ok(outcome),
                };
            }

            return Ok(SolveOutcome::Unfinished);
        }
    }

    fn force(
        &self,
        grid: &mut LatinGrid,
        ctx: &C,
        sub_tier: Difficulty,
    ) -> bool {
        let hypotheses: Vec<(Position, u8)> = grid
            .open_positions()
            .flat_map(|pos| grid.candidates(pos).iter().map(move |v| (pos, v)))
            .collect();
        let start = (grid.clone(), ctx.clone());
        let refuted = find_refutation(&start, hypotheses, |(mut g, mut c), &(pos, v)| {
            let mut sub_stats = self.new_stats();
            g.place(pos, v).is_err()
                || self
                    .run(&mut g, &mut c, sub_tier, &mut sub_stats)
                    .is_err()
        });
        if let Some((pos, v)) = refuted {
            log::trace!("forcing: {v} cannot go at {pos}");
            grid.eliminate(pos, v);
            return true;
        }
        false
    }

    fn branch(
        &self,
        grid: &mut LatinGrid,
        ctx: &mut C,
        max: Difficulty,
        stats: &mut LatinSolverStats,
    ) -> Result<SolveOutcome, SolverError> {
        let Some(pos) = grid
            .open_positions()
            .min_by_key(|&pos| grid.candidates(pos).len())
        else {
            return Ok(SolveOutcome::Unfinished);
        };
        let recursive = self.tiers.recursive.unwrap_or(Difficulty::Recursive);

        let mut found: Option<(LatinGrid, C, Difficulty)> = None;
        for v in grid.candidates(pos) {
            stats.branches += 1;
            let mut g = grid.clone();
            let mut c = ctx.clone();
            if g.place(pos, v).is_err() {
                continue;
            }
            match self.run(&mut g, &mut c, max, stats) {
                Ok(SolveOutcome::Solved(d)) => {
                    if found.is_some() {
                        return Ok(SolveOutcome::Ambiguous);
                    }
                    found = Some((g, c, d.max(recursive)));
                }
                Ok(SolveOutcome::Ambiguous) => return Ok(SolveOutcome::Ambiguous),
                Ok(SolveOutcome::Unfinished | SolveOutcome::Impossible) | Err(_) => {}
            }
        }

        let (g, c, d) = found.ok_or(SolverError::Contradiction)?;
        *grid = g;
        *ctx = c;
        Ok(SolveOutcome::Solved(d))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn tiers() -> LatinTiers {
        LatinTiers {
            simple: Difficulty::Easy,
            set: Some(Difficulty::Normal),
            forcing: Some(ForcingTier {
                tier: Difficulty::Tricky,
                sub_tier: Difficulty::Normal,
            }),
            recursive: Some(Difficulty::Recursive),
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    fn cyclic_square(order: usize, shift: usize) -> Vec<u8> {
        (0..order * order)
            .map(|i| ((i % order + (i / order) * shift) % order + 1) as u8)
            .collect()
    }

    #[test]
    fn test_solved_grid_reports_simple_tier() {
        let solver = LatinSolver::<()>::new(tiers());
        let mut grid = LatinGrid::from_values(4, &cyclic_square(4, 1)).unwrap();
        let (outcome, stats) = solver.solve(&mut grid, &mut (), Difficulty::Easy);
        assert_eq!(outcome, SolveOutcome::Solved(Difficulty::Easy));
        assert!(!stats.has_progress());
    }

    #[test]
    fn test_empty_grid_is_ambiguous_with_recursion() {
        let solver = LatinSolver::<()>::new(tiers());
        let mut grid = LatinGrid::new(3);
        let (outcome, stats) = solver.solve(&mut grid, &mut (), Difficulty::Recursive);
        assert_eq!(outcome, SolveOutcome::Ambiguous);
        assert!(stats.branches() > 0);
    }

    #[test]
    fn test_empty_grid_is_unfinished_without_recursion() {
        let solver = LatinSolver::<()>::new(tiers());
        let mut grid = LatinGrid::new(3);
        let (outcome, _) = solver.solve(&mut grid, &mut (), Difficulty::Tricky);
        assert_eq!(outcome, SolveOutcome::Unfinished);
    }

    #[test]
    fn test_contradiction_is_impossible() {
        let solver = LatinSolver::<()>::new(tiers());
        let mut grid = LatinGrid::new(3);
        grid.place(Position::new(0, 0), 1).unwrap();
        grid.place(Position::new(1, 1), 1).unwrap();
        // Row 2 now needs 1 at (2, 2); forbid it.
        grid.eliminate(Position::new(2, 2), 1);
        let (outcome, _) = solver.solve(&mut grid, &mut (), Difficulty::Recursive);
        assert_eq!(outcome, SolveOutcome::Impossible);
    }

    #[derive(Debug, Clone)]
    struct RejectAll;

    impl SolverContext for RejectAll {
        fn is_valid(&self, _grid: &LatinGrid) -> bool {
            false
        }
    }

    #[test]
    fn test_context_validation_rejects_solution() {
        let solver = LatinSolver::new(tiers());
        let mut grid = LatinGrid::from_values(3, &cyclic_square(3, 1)).unwrap();
        let (outcome, _) = solver.solve(&mut grid, &mut RejectAll, Difficulty::Recursive);
        assert_eq!(outcome, SolveOutcome::Impossible);
    }

    #[derive(Debug, Clone, Copy)]
    struct Noop;

    impl Deduction<()> for Noop {
        fn name(&self) -> &'static str {
            "noop"
        }

        fn clone_box(&self) -> BoxedDeduction<()> {
            Box::new(*self)
        }

        fn apply(&self, _grid: &mut LatinGrid, _ctx: &mut ()) -> Result<bool, SolverError> {
            Ok(false)
        }
    }

    #[test]
    fn test_rules_are_ordered_by_tier() {
        let solver = LatinSolver::<()>::new(tiers())
            .with_rule(Difficulty::Hard, Noop)
            .with_rule(Difficulty::Easy, Noop);
        let names: Vec<_> = solver.rules().iter().map(|r| r.name()).collect();
        assert_eq!(names, ["singles", "noop", "set elimination", "noop"]);
        assert_eq!(solver.new_stats().applications().len(), 4);
    }

    proptest! {
        #[test]
        fn test_one_missing_cell_per_row_is_easy(
            order in 3_usize..=8,
            shift_seed in 0_usize..8,
        ) {
            // Any shift coprime with the order yields a Latin square.
            let shift = (1..order).cycle().skip(shift_seed).find(|s| gcd(*s, order) == 1).unwrap();
            let full = cyclic_square(order, shift);
            let mut givens = full.clone();
            for y in 0..order {
                givens[y * order + (y * 2) % order] = 0;
            }
            let solver = LatinSolver::<()>::new(tiers());
            let mut grid = LatinGrid::from_values(order, &givens).unwrap();
            let (outcome, _) = solver.solve(&mut grid, &mut (), Difficulty::Easy);
            prop_assert_eq!(outcome, SolveOutcome::Solved(Difficulty::Easy));
            prop_assert_eq!(grid.values(), &full[..]);
        }
    }

    fn gcd(a: usize, b: usize) -> usize {
        if b == 0 { a } else { gcd(b, a % b) }
    }
}
