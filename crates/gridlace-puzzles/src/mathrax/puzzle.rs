use std::fmt::{self, Display};

use gridlace_core::{
    CandidateSet, CellFlags, DescriptorError, Grid, Position,
    run_length::{self, RunLengthReader},
};

use super::{ClueOptions, MathraxParams};

/// Largest number an arithmetic clue may carry.
pub const MAX_CLUE_NUMBER: u8 = 99;

/// A clue at the intersection of four cells.
///
/// Arithmetic clues hold for both diagonal pairs: the top-left and
/// bottom-right cells, and the top-right and bottom-left cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::IsVariant)]
pub enum MathraxClue {
    /// No clue.
    #[default]
    None,
    /// `a + b = n`.
    Add(u8),
    /// `|a - b| = n`. A zero difference is an equality clue.
    Sub(u8),
    /// `a * b = n`.
    Mul(u8),
    /// The larger value divided by the smaller is exactly `n`.
    Div(u8),
    /// All four cells are even.
    Even,
    /// All four cells are odd.
    Odd,
}

impl MathraxClue {
    /// Returns the values a cell may hold when its diagonal partner holds one
    /// of `partner`.
    ///
    /// With `simple` set, arithmetic clues only constrain the cell once the
    /// partner is down to a single value.
    #[must_use]
    pub fn options(self, partner: CandidateSet, simple: bool) -> CandidateSet {
        match self {
            Self::None => CandidateSet::full(9),
            Self::Even => [2, 4, 6, 8].into_iter().collect(),
            Self::Odd => [1, 3, 5, 7, 9].into_iter().collect(),
            Self::Add(_) | Self::Sub(_) | Self::Mul(_) | Self::Div(_) => {
                if simple && partner.len() > 1 {
                    return CandidateSet::full(9);
                }
                partner
                    .iter()
                    .flat_map(|a| (1..=9).filter(move |&b| self.allows(a, b)))
                    .collect()
            }
        }
    }

    /// Returns `true` if the diagonal pair `(a, b)` satisfies the clue.
    #[must_use]
    pub fn allows(self, a: u8, b: u8) -> bool {
        match self {
            Self::None => true,
            Self::Add(n) => u16::from(a) + u16::from(b) == u16::from(n),
            Self::Sub(n) => a.abs_diff(b) == n,
            Self::Mul(n) => u16::from(a) * u16::from(b) == u16::from(n),
            Self::Div(n) => {
                let (hi, lo) = (a.max(b), a.min(b));
                lo != 0 && hi % lo == 0 && hi / lo == n
            }
            Self::Even => a % 2 == 0 && b % 2 == 0,
            Self::Odd => a % 2 == 1 && b % 2 == 1,
        }
    }

    /// Picks the clue shared by the diagonal pairs `(a1, b1)` and `(a2, b2)`.
    ///
    /// Clue kinds are tried in a fixed order and only those in `options` are
    /// considered. Returns [`MathraxClue::None`] if no kind fits.
    #[must_use]
    pub fn fitting(a1: u8, b1: u8, a2: u8, b2: u8, options: ClueOptions) -> Self {
        let (a1, b1) = (a1.max(b1), a1.min(b1));
        let (a2, b2) = (a2.max(b2), a2.min(b2));

        if options.contains(ClueOptions::ADD) && a1 + b1 == a2 + b2 {
            return Self::Add(a1 + b1);
        }
        if options.contains(ClueOptions::SUB) && a1 - b1 == a2 - b2 && a1 > b1 {
            return Self::Sub(a1 - b1);
        }
        if options.contains(ClueOptions::EQUAL) && a1 == b1 && a2 == b2 {
            return Self::Sub(0);
        }
        if options.contains(ClueOptions::MUL) && a1 * b1 == a2 * b2 {
            return Self::Mul(a1 * b1);
        }
        if options.contains(ClueOptions::DIV)
            && a1 % b1 == 0
            && a2 % b2 == 0
            && a1 / b1 == a2 / b2
            && a1 != b1
        {
            return Self::Div(a1 / b1);
        }
        if options.contains(ClueOptions::PARITY) {
            if a1 & b1 & a2 & b2 & 1 == 1 {
                return Self::Odd;
            }
            if (a1 | b1 | a2 | b2) & 1 == 0 {
                return Self::Even;
            }
        }
        Self::None
    }

    fn number(self) -> Option<u8> {
        match self {
            Self::Add(n) | Self::Sub(n) | Self::Mul(n) | Self::Div(n) => Some(n),
            Self::None | Self::Even | Self::Odd => None,
        }
    }
}

/// Descriptor token of a clue, e.g. `A7` or `E`.
impl Display for MathraxClue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::None => return Ok(()),
            Self::Add(_) => 'A',
            Self::Sub(_) => 'S',
            Self::Mul(_) => 'M',
            Self::Div(_) => 'D',
            Self::Even => 'E',
            Self::Odd => 'O',
        };
        write!(f, "{tag}")?;
        if let Some(n) = self.number() {
            write!(f, "{n}")?;
        }
        Ok(())
    }
}

/// Mathrax puzzle content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MathraxPuzzle {
    /// Given digits, `0` for empty.
    pub grid: Grid<u8>,
    /// Intersection clues, `(order - 1)` on each side. The clue at `(x, y)`
    /// touches the cells `(x, y)`, `(x + 1, y)`, `(x, y + 1)` and
    /// `(x + 1, y + 1)`.
    pub clues: Grid<MathraxClue>,
}

impl MathraxPuzzle {
    /// Creates a puzzle without any clue.
    #[must_use]
    pub fn empty(order: usize) -> Self {
        let inner = order.saturating_sub(1);
        Self {
            grid: Grid::new(order, order, 0),
            clues: Grid::new(inner, inner, MathraxClue::None),
        }
    }

    /// Returns the side length of the grid.
    #[must_use]
    pub fn order(&self) -> usize {
        self.grid.width()
    }
}

/// Returns the clues touching `pos`, each with the diagonal partner it pairs
/// `pos` with and the direction of that partner.
pub(crate) fn clues_around(
    clues: &Grid<MathraxClue>,
    pos: Position,
) -> impl Iterator<Item = (MathraxClue, Position, Corner)> + '_ {
    let order = clues.width() + 1;
    Corner::ALL.into_iter().filter_map(move |corner| {
        let (dx, dy) = corner.offset();
        let partner = pos.offset(dx, dy, order, order)?;
        let clue = clues.get(Position::new(
            pos.x().min(partner.x()),
            pos.y().min(partner.y()),
        ))?;
        Some((*clue, partner, corner))
    })
}

/// A diagonal direction from a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    const ALL: [Self; 4] = [
        Self::BottomRight,
        Self::TopRight,
        Self::BottomLeft,
        Self::TopLeft,
    ];

    const fn offset(self) -> (isize, isize) {
        match self {
            Self::TopLeft => (-1, -1),
            Self::TopRight => (1, -1),
            Self::BottomLeft => (-1, 1),
            Self::BottomRight => (1, 1),
        }
    }

    pub(crate) const fn error_flag(self) -> CellFlags {
        match self {
            Self::TopLeft => CellFlags::ERROR_TOP_LEFT,
            Self::TopRight => CellFlags::ERROR_TOP_RIGHT,
            Self::BottomLeft => CellFlags::ERROR_BOTTOM_LEFT,
            Self::BottomRight => CellFlags::ERROR_BOTTOM_RIGHT,
        }
    }
}

pub(super) fn encode(puzzle: &MathraxPuzzle) -> String {
    let grid = run_length::encode(puzzle.grid.as_slice(), |&d| {
        (d != 0).then(|| d.to_string())
    });
    let clues = run_length::encode(puzzle.clues.as_slice(), |clue| {
        (!clue.is_none()).then(|| clue.to_string())
    });
    format!("{grid},{clues}")
}

fn clue_token(c: char, reader: &mut RunLengthReader<'_>) -> Result<(MathraxClue, u32), char> {
    let make: fn(u8) -> MathraxClue = match c {
        'A' => MathraxClue::Add,
        'S' => MathraxClue::Sub,
        'M' => MathraxClue::Mul,
        'D' => MathraxClue::Div,
        'E' => return Ok((MathraxClue::Even, 0)),
        'O' => return Ok((MathraxClue::Odd, 0)),
        _ => return Err(c),
    };
    let n = reader.take_number().ok_or(c)?;
    Ok((make(u8::try_from(n).unwrap_or(u8::MAX)), n))
}

pub(super) fn decode(
    params: &MathraxParams,
    desc: &str,
) -> Result<MathraxPuzzle, DescriptorError> {
    let order = params.order;
    let inner = order - 1;
    let (grid_desc, clue_desc) = desc.split_once(',').unwrap_or((desc, ""));

    let cells = run_length::decode("grid", grid_desc, order * order, |c, _| {
        c.to_digit(10)
            .filter(|&d| d > 0)
            .and_then(|d| u8::try_from(d).ok())
            .ok_or(c)
    })?;
    if let Some(&d) = cells.iter().find(|&&d| d > params.order_u8()) {
        return Err(DescriptorError::OutOfRange {
            section: "grid",
            value: u32::from(d),
        });
    }

    let mut too_large = None;
    let clues = run_length::decode("clue", clue_desc, inner * inner, |c, reader| {
        let (clue, n) = clue_token(c, reader)?;
        if n > u32::from(MAX_CLUE_NUMBER) {
            too_large = too_large.or(Some(n));
        }
        Ok(clue)
    });
    // An oversized number outranks whatever went wrong after it.
    if let Some(value) = too_large {
        return Err(DescriptorError::OutOfRange {
            section: "clue",
            value,
        });
    }
    let clues = clues?;

    let grid = Grid::from_vec(order, order, cells)
        .ok_or(DescriptorError::Inconsistent { section: "grid" })?;
    let clues = Grid::from_vec(inner, inner, clues)
        .ok_or(DescriptorError::Inconsistent { section: "clue" })?;
    Ok(MathraxPuzzle { grid, clues })
}
