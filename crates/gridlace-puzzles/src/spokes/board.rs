//! Hub numbers and spoke states, shared by the solver and the play state.

use gridlace_core::{DisjointSet, Grid, Position, Status};

use super::{Direction, HubClue, Hub, Spoke, SpokesPuzzle};

/// A Spokes grid in progress.
///
/// A spoke is stored on both hubs it joins; the two copies always agree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpokesBoard {
    numbers: Grid<u8>,
    spokes: Grid<Hub>,
}

/// Every spoke that stays on the grid, left empty.
pub(crate) fn open_spokes(width: usize, height: usize) -> Grid<Hub> {
    let mut spokes = Grid::new(width, height, Hub::EMPTY);
    for pos in spokes.positions() {
        for dir in Direction::ALL {
            let (dx, dy) = dir.delta();
            if pos.offset(dx, dy, width, height).is_none() {
                spokes[pos].set(dir, Spoke::Hidden);
            }
        }
    }
    spokes
}

/// Sets a spoke on both of its hubs.
pub(crate) fn set_spoke(spokes: &mut Grid<Hub>, pos: Position, dir: Direction, spoke: Spoke) {
    spokes[pos].set(dir, spoke);
    let (dx, dy) = dir.delta();
    if let Some(other) = pos.offset(dx, dy, spokes.width(), spokes.height()) {
        spokes[other].set(dir.opposite(), spoke);
    }
}

impl SpokesBoard {
    pub(crate) fn new(puzzle: &SpokesPuzzle) -> Self {
        let hubs = &puzzle.hubs;
        let mut board = Self {
            numbers: hubs.map(|clue| clue.number()),
            spokes: open_spokes(hubs.width(), hubs.height()),
        };
        for pos in hubs.positions() {
            if board.numbers[pos] > 0 {
                continue;
            }
            for dir in Direction::ALL {
                board.place(pos, dir, Spoke::Hidden);
            }
            if hubs[pos] == HubClue::Block {
                let sides = [
                    (Direction::Left, [Direction::TopRight, Direction::BottomRight]),
                    (Direction::Right, [Direction::TopLeft, Direction::BottomLeft]),
                    (Direction::Top, [Direction::BottomLeft, Direction::BottomRight]),
                    (Direction::Bottom, [Direction::TopLeft, Direction::TopRight]),
                ];
                for (side, diagonals) in sides {
                    if let Some(next) = board.neighbor(pos, side) {
                        for dir in diagonals {
                            board.place(next, dir, Spoke::Hidden);
                        }
                    }
                }
            }
        }
        board
    }

    /// Returns the number of hub columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.numbers.width()
    }

    /// Returns the number of hub rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.numbers.height()
    }

    /// Returns the number of lines the hub at `pos` needs.
    #[must_use]
    pub fn number(&self, pos: Position) -> u8 {
        self.numbers[pos]
    }

    /// Returns the spokes of the hub at `pos`.
    #[must_use]
    pub fn hub(&self, pos: Position) -> Hub {
        self.spokes[pos]
    }

    /// Returns the spokes of every hub.
    #[must_use]
    pub fn hubs(&self) -> &Grid<Hub> {
        &self.spokes
    }

    /// Returns the spoke of the hub at `pos` pointing in `dir`.
    #[must_use]
    pub fn spoke(&self, pos: Position, dir: Direction) -> Spoke {
        self.spokes[pos].spoke(dir)
    }

    pub(crate) fn neighbor(&self, pos: Position, dir: Direction) -> Option<Position> {
        let (dx, dy) = dir.delta();
        pos.offset(dx, dy, self.width(), self.height())
    }

    pub(crate) fn place(&mut self, pos: Position, dir: Direction, spoke: Spoke) {
        set_spoke(&mut self.spokes, pos, dir, spoke);
    }

    /// Returns every spoke that is still undecided, once per line.
    pub(crate) fn empty_spokes(&self) -> Vec<(Position, Direction)> {
        self.spokes
            .positions()
            .flat_map(|pos| Direction::FORWARD.map(|dir| (pos, dir)))
            .filter(|&(pos, dir)| self.spoke(pos, dir).is_empty())
            .collect()
    }

    /// Returns `true` if the diagonal lines of the square whose top-left
    /// corner is `pos` cross.
    pub(crate) fn lines_cross(&self, pos: Position) -> bool {
        self.spoke(pos, Direction::BottomRight).is_line()
            && self
                .neighbor(pos, Direction::Right)
                .is_some_and(|right| self.spoke(right, Direction::BottomLeft).is_line())
    }

    /// Returns `true` if the hub at `pos` has more lines than its number, or
    /// too many marks left to reach it.
    pub(crate) fn overloaded(&self, pos: Position) -> bool {
        let hub = self.spokes[pos];
        let number = self.numbers[pos];
        hub.count(Spoke::Line) > number || hub.count(Spoke::Marked) + number > hub.available()
    }

    /// Validates the grid.
    ///
    /// A grid is invalid if a hub is overloaded, two diagonals cross, or a
    /// group of connected hubs can take no more lines without spanning the
    /// grid.
    #[must_use]
    pub fn status(&self) -> Status {
        let mut status = Status::Complete;
        for pos in self.numbers.positions() {
            if self.overloaded(pos) || self.lines_cross(pos) {
                return Status::Invalid;
            }
            if self.spokes[pos].count(Spoke::Line) < self.numbers[pos] {
                status = Status::Incomplete;
            }
        }
        if self.has_isolated_group() {
            return Status::Invalid;
        }
        status
    }

    fn has_isolated_group(&self) -> bool {
        let len = self.numbers.len();
        let mut dsf = DisjointSet::new(len);
        // Empty cells all join one set, anchored on the first hub when the
        // top-left cell is empty itself.
        if self.numbers.as_slice().first() == Some(&0)
            && let Some(first) = self.numbers.iter().position(|&n| n > 0)
        {
            dsf.merge(first, 0);
        }
        for pos in self.numbers.positions() {
            let i = self.numbers.index_of(pos);
            if self.numbers[pos] == 0 {
                dsf.merge(i, 0);
                continue;
            }
            for dir in Direction::FORWARD {
                if self.spoke(pos, dir).is_line()
                    && let Some(next) = self.neighbor(pos, dir)
                {
                    dsf.merge(i, self.numbers.index_of(next));
                }
            }
        }

        let mut open = vec![0_usize; len];
        for pos in self.numbers.positions() {
            let i = self.numbers.index_of(pos);
            let missing = self.numbers[pos].saturating_sub(self.spokes[pos].count(Spoke::Line));
            open[dsf.canonify(i)] += usize::from(missing);
        }
        (0..len).any(|i| open[i] == 0 && dsf.canonify(i) == i && dsf.size(i) < len)
    }

    /// Resets every line and mark to empty.
    pub(crate) fn clear(&mut self) {
        for hub in self.spokes.iter_mut() {
            for dir in Direction::ALL {
                if !hub.spoke(dir).is_hidden() {
                    hub.set(dir, Spoke::Empty);
                }
            }
        }
    }
}
