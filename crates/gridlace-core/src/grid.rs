//! Dense rectangular grids addressed by [`Position`].

use std::{
    fmt::{self, Display},
    ops::{Index, IndexMut},
};

/// A cell coordinate, `x` growing rightwards and `y` downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    x: usize,
    y: usize,
}

impl Position {
    /// Creates a position.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the column.
    #[must_use]
    pub const fn x(self) -> usize {
        self.x
    }

    /// Returns the row.
    #[must_use]
    pub const fn y(self) -> usize {
        self.y
    }

    /// Returns the position shifted by `(dx, dy)` if it stays inside a
    /// `width`×`height` area.
    #[must_use]
    pub fn offset(self, dx: isize, dy: isize, width: usize, height: usize) -> Option<Self> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        (x < width && y < height).then_some(Self { x, y })
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A `width`×`height` array stored in row-major order.
///
/// # Examples
///
/// ```
/// use gridlace_core::{Grid, Position};
///
/// let mut grid = Grid::new(3, 2, 0_u8);
/// grid[Position::new(2, 1)] = 7;
///
/// assert_eq!(grid.len(), 6);
/// assert_eq!(grid.as_slice()[5], 7);
/// assert_eq!(grid.row(1), &[0, 0, 7]);
/// assert_eq!(grid.position_of(5), Position::new(2, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Creates a grid with every cell set to `fill`.
    #[must_use]
    pub fn new(width: usize, height: usize, fill: T) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }
}

impl<T> Grid<T> {
    /// Wraps a row-major vector.
    ///
    /// Returns `None` if the length does not match the dimensions.
    #[must_use]
    pub fn from_vec(width: usize, height: usize, cells: Vec<T>) -> Option<Self> {
        (cells.len() == width * height).then_some(Self {
            width,
            height,
            cells,
        })
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the grid has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns `true` if `(x, y)` lies inside the grid.
    #[must_use]
    pub const fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Returns the row-major index of `pos`.
    #[must_use]
    pub const fn index_of(&self, pos: Position) -> usize {
        pos.y * self.width + pos.x
    }

    /// Returns the position of a row-major index.
    #[must_use]
    pub const fn position_of(&self, index: usize) -> Position {
        Position::new(index % self.width, index / self.width)
    }

    /// Returns the cell at `pos`, or `None` if it is outside the grid.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&T> {
        self.contains(pos.x, pos.y)
            .then(|| &self.cells[self.index_of(pos)])
    }

    /// Returns a mutable reference to the cell at `pos`, or `None` if it is
    /// outside the grid.
    #[must_use]
    pub fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
        if self.contains(pos.x, pos.y) {
            let i = self.index_of(pos);
            Some(&mut self.cells[i])
        } else {
            None
        }
    }

    /// Iterates over every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<T> {
        let width = self.width;
        (0..self.cells.len()).map(move |i| Position::new(i % width, i / width))
    }

    /// Iterates over the cells in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.cells.iter()
    }

    /// Iterates mutably over the cells in row-major order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.cells.iter_mut()
    }

    /// Returns the cells as a row-major slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    /// Returns the cells as a mutable row-major slice.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.cells
    }

    /// Returns row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y` is out of range.
    #[must_use]
    pub fn row(&self, y: usize) -> &[T] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    /// Builds a grid of the same shape by mapping every cell.
    #[must_use]
    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        F: FnMut(&T) -> U,
    {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(f).collect(),
        }
    }
}

impl<T> Index<Position> for Grid<T> {
    type Output = T;

    fn index(&self, pos: Position) -> &T {
        assert!(self.contains(pos.x, pos.y), "position {pos} out of range");
        &self.cells[self.index_of(pos)]
    }
}

impl<T> IndexMut<Position> for Grid<T> {
    fn index_mut(&mut self, pos: Position) -> &mut T {
        assert!(self.contains(pos.x, pos.y), "position {pos} out of range");
        let i = self.index_of(pos);
        &mut self.cells[i]
    }
}

impl<'a, T> IntoIterator for &'a Grid<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        let grid = Grid::new(4, 3, ());
        for (i, pos) in grid.positions().enumerate() {
            assert_eq!(grid.index_of(pos), i);
            assert_eq!(grid.position_of(i), pos);
        }
    }

    #[test]
    fn test_get_out_of_range() {
        let mut grid = Grid::new(2, 2, 1);
        assert_eq!(grid.get(Position::new(1, 1)), Some(&1));
        assert_eq!(grid.get(Position::new(2, 0)), None);
        assert!(grid.get_mut(Position::new(0, 2)).is_none());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_index_out_of_range_panics() {
        let grid = Grid::new(2, 2, 0);
        let _ = grid[Position::new(0, 5)];
    }

    #[test]
    fn test_offset() {
        let pos = Position::new(0, 1);
        assert_eq!(pos.offset(1, 1, 3, 3), Some(Position::new(1, 2)));
        assert_eq!(pos.offset(-1, 0, 3, 3), None);
        assert_eq!(pos.offset(0, 2, 3, 3), None);
    }

    #[test]
    fn test_from_vec_and_map() {
        assert!(Grid::from_vec(2, 2, vec![1, 2, 3]).is_none());
        let grid = Grid::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
        let doubled = grid.map(|v| v * 2);
        assert_eq!(doubled.as_slice(), &[2, 4, 6, 8]);
        assert_eq!(doubled.row(1), &[6, 8]);
    }
}
