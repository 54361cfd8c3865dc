use gridlace_core::{CandidateSet, Position};

use crate::SolverError;

/// A row or column of a Latin square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum House {
    /// A row identified by its y coordinate.
    Row {
        /// Row index.
        y: usize,
    },
    /// A column identified by its x coordinate.
    Column {
        /// Column index.
        x: usize,
    },
}

impl House {
    /// Iterates over every row, then every column, of an `order`×`order`
    /// square.
    pub fn all(order: usize) -> impl Iterator<Item = Self> {
        (0..order)
            .map(|y| Self::Row { y })
            .chain((0..order).map(|x| Self::Column { x }))
    }

    /// Iterates over the positions of the house.
    pub fn cells(self, order: usize) -> impl Iterator<Item = Position> {
        (0..order).map(move |i| match self {
            Self::Row { y } => Position::new(i, y),
            Self::Column { x } => Position::new(x, i),
        })
    }
}

/// Scratch state of the Latin solver: a cube of possibilities.
///
/// Every cell carries a [`CandidateSet`] of the values still possible there,
/// plus the value placed so far. Placing a value narrows the cell to that
/// value and removes it from every other cell of the row and column.
///
/// A `LatinGrid` is created per solve call and cloned for every hypothetical
/// branch.
///
/// # Examples
///
/// ```
/// use gridlace_core::Position;
/// use gridlace_solver::LatinGrid;
///
/// let mut grid = LatinGrid::new(4);
/// grid.place(Position::new(0, 0), 3)?;
///
/// assert_eq!(grid.value(Position::new(0, 0)), Some(3));
/// assert!(!grid.candidates(Position::new(2, 0)).contains(3));
/// assert!(!grid.candidates(Position::new(0, 1)).contains(3));
/// assert!(grid.candidates(Position::new(1, 1)).contains(3));
/// # Ok::<(), gridlace_solver::SolverError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatinGrid {
    order: usize,
    candidates: Vec<CandidateSet>,
    values: Vec<u8>,
}

impl LatinGrid {
    /// Creates a grid where every value is possible everywhere.
    ///
    /// # Panics
    ///
    /// Panics if `order` is zero or larger than [`CandidateSet::MAX_VALUE`].
    #[must_use]
    pub fn new(order: usize) -> Self {
        assert!(order > 0 && order <= usize::from(CandidateSet::MAX_VALUE));
        #[expect(clippy::cast_possible_truncation)]
        let full = CandidateSet::full(order as u8);
        Self {
            order,
            candidates: vec![full; order * order],
            values: vec![0; order * order],
        }
    }

    /// Creates a grid and places every non-zero entry of the row-major
    /// `values`.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Contradiction`] if two entries conflict.
    ///
    /// # Panics
    ///
    /// Panics if `values` does not hold `order * order` entries.
    pub fn from_values(order: usize, values: &[u8]) -> Result<Self, SolverError> {
        assert_eq!(values.len(), order * order);
        let mut grid = Self::new(order);
        for (i, &v) in values.iter().enumerate() {
            if v != 0 {
                grid.place(Position::new(i % order, i / order), v)?;
            }
        }
        Ok(grid)
    }

    /// Returns the side length.
    #[must_use]
    pub const fn order(&self) -> usize {
        self.order
    }

    const fn index(&self, pos: Position) -> usize {
        pos.y() * self.order + pos.x()
    }

    /// Returns the values still possible at `pos`.
    #[must_use]
    pub fn candidates(&self, pos: Position) -> CandidateSet {
        self.candidates[self.index(pos)]
    }

    /// Returns the value placed at `pos`.
    #[must_use]
    pub fn value(&self, pos: Position) -> Option<u8> {
        match self.values[self.index(pos)] {
            0 => None,
            v => Some(v),
        }
    }

    /// Returns the placed values in row-major order, `0` for open cells.
    #[must_use]
    pub fn values(&self) -> &[u8] {
        &self.values
    }

    /// Iterates over every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let order = self.order;
        (0..order * order).map(move |i| Position::new(i % order, i / order))
    }

    /// Iterates over the positions that have no value placed yet.
    pub fn open_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions().filter(|&pos| self.value(pos).is_none())
    }

    /// Returns `true` if every cell has a value.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.values.iter().all(|&v| v != 0)
    }

    /// Places `value` at `pos` and removes it from the row and column.
    ///
    /// Returns `Ok(false)` if the value was already placed there.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Contradiction`] if `value` is no longer a
    /// candidate at `pos`.
    pub fn place(&mut self, pos: Position, value: u8) -> Result<bool, SolverError> {
        let i = self.index(pos);
        if self.values[i] == value {
            return Ok(false);
        }
        if self.values[i] != 0 || !self.candidates[i].contains(value) {
            return Err(SolverError::Contradiction);
        }
        self.values[i] = value;
        self.candidates[i] = CandidateSet::from_value(value);
        for k in 0..self.order {
            if k != pos.x() {
                self.eliminate(Position::new(k, pos.y()), value);
            }
            if k != pos.y() {
                self.eliminate(Position::new(pos.x(), k), value);
            }
        }
        Ok(true)
    }

    /// Removes `value` from the candidates at `pos`.
    ///
    /// Returns `true` if it was present.
    pub fn eliminate(&mut self, pos: Position, value: u8) -> bool {
        let i = self.index(pos);
        self.candidates[i].remove(value)
    }

    /// Intersects the candidates at `pos` with `allowed`.
    ///
    /// Returns `true` if anything was removed.
    pub fn restrict(&mut self, pos: Position, allowed: CandidateSet) -> bool {
        let i = self.index(pos);
        let before = self.candidates[i];
        self.candidates[i] &= allowed;
        self.candidates[i] != before
    }

    /// Checks that the grid can still be completed locally.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Contradiction`] if a cell has no candidate left,
    /// or a row or column has a value with nowhere to go.
    pub fn check_consistency(&self) -> Result<(), SolverError> {
        if self.candidates.iter().any(|c| c.is_empty()) {
            return Err(SolverError::Contradiction);
        }
        #[expect(clippy::cast_possible_truncation)]
        let full = CandidateSet::full(self.order as u8);
        for house in House::all(self.order) {
            let covered = house
                .cells(self.order)
                .fold(CandidateSet::EMPTY, |acc, pos| acc | self.candidates(pos));
            if covered != full {
                return Err(SolverError::Contradiction);
            }
        }
        Ok(())
    }
}
