//! Spokes deduction.
//!
//! The solver alternates two local rules until neither applies, then probes
//! undecided spokes by contradiction. Tricky probes run a short, action-capped
//! Easy solve on the hypothesis; Hard probes run the full Easy solve.

use gridlace_core::{Difficulty, Grid, Position, SolveOutcome, SolveReport, Status};
use gridlace_solver::find_refutation;

use super::{Direction, Hub, Spoke, SpokesBoard, SpokesParams, SpokesPuzzle};

/// Number of actions a limited probe may take.
const ACTION_LIMIT: usize = 4;

/// How hard a solve may work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Effort {
    /// Easy rules for at most [`ACTION_LIMIT`] actions.
    Limited,
    /// Easy rules.
    Easy,
    /// Easy rules and limited probes.
    Tricky,
    /// Easy rules and probes of both strengths.
    Hard,
}

impl Effort {
    const fn from_difficulty(d: Difficulty) -> Self {
        match d {
            Difficulty::Easy | Difficulty::Normal => Self::Easy,
            Difficulty::Tricky => Self::Tricky,
            Difficulty::Hard | Difficulty::Recursive => Self::Hard,
        }
    }
}

/// Marks every spoke joining two 1-hubs, as that pair could never connect
/// to anything else. Skipped when those two are the only hubs.
fn mark_ones(board: &mut SpokesBoard) -> usize {
    let positions: Vec<Position> = board.hubs().positions().collect();
    let hubs = positions.iter().filter(|&&pos| board.number(pos) > 0).count();
    if hubs == 2 {
        return 0;
    }
    let mut actions = 0;
    for &pos in &positions {
        if board.number(pos) != 1 {
            continue;
        }
        for dir in Direction::FORWARD {
            if let Some(next) = board.neighbor(pos, dir)
                && board.number(next) == 1
                && !board.spoke(pos, dir).is_hidden()
            {
                board.place(pos, dir, Spoke::Marked);
                actions += 1;
            }
        }
    }
    actions
}

/// Fills a hub whose remaining spokes are all needed, and marks the rest of
/// a hub that has all its lines. Returns the number of hubs changed.
fn fill_hubs(board: &mut SpokesBoard) -> usize {
    let mut actions = 0;
    let positions: Vec<Position> = board.hubs().positions().collect();
    for pos in positions {
        let number = board.number(pos);
        let mut changed = false;
        let hub = board.hub(pos);
        if hub.available() - hub.count(Spoke::Marked) == number {
            changed |= fill_empty(board, pos, Spoke::Line);
        }
        if board.hub(pos).count(Spoke::Line) == number {
            changed |= fill_empty(board, pos, Spoke::Marked);
        }
        if changed {
            actions += 1;
        }
    }
    actions
}

fn fill_empty(board: &mut SpokesBoard, pos: Position, spoke: Spoke) -> bool {
    let mut changed = false;
    for dir in Direction::ALL {
        if board.spoke(pos, dir).is_empty() {
            board.place(pos, dir, spoke);
            changed = true;
        }
    }
    changed
}

/// Marks an undecided diagonal that would cross a drawn one.
fn mark_crossings(board: &mut SpokesBoard) -> bool {
    let mut changed = false;
    let positions: Vec<Position> = board.hubs().positions().collect();
    for pos in positions {
        let Some(right) = board.neighbor(pos, Direction::Right) else {
            continue;
        };
        let down = board.spoke(pos, Direction::BottomRight);
        let up = board.spoke(right, Direction::BottomLeft);
        if down.is_line() && up.is_empty() {
            board.place(right, Direction::BottomLeft, Spoke::Marked);
            changed = true;
        }
        if down.is_empty() && up.is_line() {
            board.place(pos, Direction::BottomRight, Spoke::Marked);
            changed = true;
        }
    }
    changed
}

/// Looks for an undecided spoke where one choice fails under `effort`, and
/// commits the other choice.
fn probe(board: &mut SpokesBoard, effort: Effort) -> bool {
    let hypotheses = board
        .empty_spokes()
        .into_iter()
        .flat_map(|(pos, dir)| [Spoke::Line, Spoke::Marked].map(|spoke| (pos, dir, spoke)));
    let refuted = find_refutation(&*board, hypotheses, |mut copy, &(pos, dir, spoke)| {
        copy.place(pos, dir, spoke);
        run(&mut copy, effort).0 == Status::Invalid
    });
    let Some((pos, dir, spoke)) = refuted else {
        return false;
    };
    let forced = if spoke.is_line() {
        Spoke::Marked
    } else {
        Spoke::Line
    };
    log::trace!("spokes: {pos} {dir:?} cannot be {spoke:?}");
    board.place(pos, dir, forced);
    true
}

/// Solves `board` in place, returning its status and the hardest tier used.
fn run(board: &mut SpokesBoard, effort: Effort) -> (Status, Difficulty) {
    let mut used = Difficulty::Easy;
    let mut actions = mark_ones(board);
    loop {
        if board.status() != Status::Incomplete {
            break;
        }
        if effort == Effort::Limited && actions >= ACTION_LIMIT {
            break;
        }
        let filled = fill_hubs(board);
        if filled > 0 {
            actions += filled;
            continue;
        }
        if mark_crossings(board) {
            actions += 1;
            continue;
        }
        if effort >= Effort::Tricky && probe(board, Effort::Limited) {
            used = used.max(Difficulty::Tricky);
            continue;
        }
        if effort >= Effort::Hard && probe(board, Effort::Easy) {
            used = Difficulty::Hard;
            continue;
        }
        break;
    }
    (board.status(), used)
}

pub(crate) fn solve(
    params: &SpokesParams,
    puzzle: &SpokesPuzzle,
    max: Difficulty,
) -> SolveReport<Grid<Hub>> {
    let mut board = SpokesBoard::new(puzzle);
    let (status, used) = run(&mut board, Effort::from_difficulty(max));
    log::trace!("spokes {params}: {status} at {used}");
    match status {
        Status::Complete => {
            // A complete board may still hold undecided spokes; none of them is a line.
            let positions: Vec<Position> = board.hubs().positions().collect();
            for pos in positions {
                fill_empty(&mut board, pos, Spoke::Marked);
            }
            SolveReport::solved(used, board.hubs().clone())
        }
        Status::Incomplete => SolveReport::unsolved(SolveOutcome::Unfinished),
        Status::Invalid => SolveReport::unsolved(SolveOutcome::Impossible),
    }
}
