use gridlace_core::{
    DescriptorError, Grid, Position,
    run_length::{self, RunLengthReader, RunLengthWriter},
};

use super::{SaladMode, SaladParams};

/// A grid clue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::IsVariant)]
pub enum SaladClue {
    /// No clue.
    #[default]
    Empty,
    /// A given symbol, `1..=symbols`.
    Symbol(u8),
    /// The cell holds some symbol.
    Circle,
    /// The cell is a hole.
    Cross,
}

/// Salad puzzle content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SaladPuzzle {
    /// Border clues, `4 * order` entries, `0` for none.
    ///
    /// Ordered top (left to right), left (top to bottom), bottom (left to
    /// right), right (top to bottom). Always zero in numbers mode.
    pub border: Vec<u8>,
    /// Grid clues.
    pub grid: Grid<SaladClue>,
}

impl SaladPuzzle {
    /// Creates a puzzle without any clue.
    #[must_use]
    pub fn empty(order: usize) -> Self {
        Self {
            border: vec![0; order * 4],
            grid: Grid::new(order, order, SaladClue::Empty),
        }
    }
}

/// Returns the cells seen from border clue `index`, nearest first.
pub(crate) fn border_cells(order: usize, index: usize) -> impl Iterator<Item = Position> {
    let (side, k) = (index / order, index % order);
    (0..order).map(move |d| {
        let far = order - 1 - d;
        match side {
            0 => Position::new(k, d),
            1 => Position::new(d, k),
            2 => Position::new(k, far),
            _ => Position::new(far, k),
        }
    })
}

fn symbol_value(c: char) -> Option<u8> {
    match c {
        '1'..='9' => Some(c as u8 - b'0'),
        'A'..='I' => Some(c as u8 - b'A' + 1),
        _ => None,
    }
}

fn check_range<'a>(
    section: &'static str,
    values: impl IntoIterator<Item = &'a u8>,
    symbols: u8,
) -> Result<(), DescriptorError> {
    match values.into_iter().find(|&&v| v > symbols) {
        Some(&v) => Err(DescriptorError::OutOfRange {
            section,
            value: u32::from(v),
        }),
        None => Ok(()),
    }
}

pub(super) fn encode(params: &SaladParams, puzzle: &SaladPuzzle) -> String {
    let grid = run_length::encode(puzzle.grid.as_slice(), |clue| match *clue {
        SaladClue::Empty => None,
        SaladClue::Symbol(v) => Some(params.mode.symbol_char(v).to_string()),
        SaladClue::Circle => Some("O".to_owned()),
        SaladClue::Cross => Some("X".to_owned()),
    });
    match params.mode {
        SaladMode::Numbers => grid,
        SaladMode::Letters => {
            let mut border = RunLengthWriter::new();
            for &v in &puzzle.border {
                if v == 0 {
                    border.push_empty();
                } else {
                    border.push_char(SaladMode::Letters.symbol_char(v));
                }
            }
            format!("{},{grid}", border.finish())
        }
    }
}

pub(super) fn decode(params: &SaladParams, desc: &str) -> Result<SaladPuzzle, DescriptorError> {
    let order = params.order;
    let symbols = params.symbol_count();

    let (border, grid_desc) = match params.mode {
        SaladMode::Numbers => (vec![0; order * 4], desc),
        SaladMode::Letters => {
            let (border_desc, grid_desc) = desc.split_once(',').unwrap_or((desc, ""));
            if border_desc.is_empty() {
                return Err(DescriptorError::TooShort { section: "border" });
            }
            let border = run_length::decode(
                "border",
                border_desc,
                order * 4,
                |c, _: &mut RunLengthReader<'_>| symbol_value(c).ok_or(c),
            )?;
            check_range("border", &border, symbols)?;
            (border, grid_desc)
        }
    };

    let cells = run_length::decode("grid", grid_desc, order * order, |c, _| match c {
        'O' => Ok(SaladClue::Circle),
        'X' => Ok(SaladClue::Cross),
        _ => symbol_value(c).map(SaladClue::Symbol).ok_or(c),
    })?;
    let given = cells.iter().filter_map(|clue| match clue {
        SaladClue::Symbol(v) => Some(v),
        _ => None,
    });
    check_range("grid", given, symbols)?;

    let grid = Grid::from_vec(order, order, cells)
        .ok_or(DescriptorError::Inconsistent { section: "grid" })?;
    Ok(SaladPuzzle { border, grid })
}
