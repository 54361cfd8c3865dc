use gridlace_core::{DescriptorError, Grid};

use super::SpokesParams;

const SECTION: &str = "hubs";

/// A cell of a Spokes puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum HubClue {
    /// A hub that needs this many lines. A hub of `0` is an empty cell.
    Number(u8),
    /// A blocked cell. Diagonal lines may not pass by its sides.
    Block,
}

impl HubClue {
    /// Returns the number of lines the hub needs, `0` for a block.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Number(n) => n,
            Self::Block => 0,
        }
    }
}

impl Default for HubClue {
    fn default() -> Self {
        Self::Number(0)
    }
}

/// A Spokes puzzle: one clue per grid point.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpokesPuzzle {
    /// The hub numbers.
    pub hubs: Grid<HubClue>,
}

pub(super) fn encode(puzzle: &SpokesPuzzle) -> String {
    puzzle
        .hubs
        .iter()
        .map(|&clue| match clue {
            HubClue::Number(n) => char::from(b'0' + n),
            HubClue::Block => 'X',
        })
        .collect()
}

pub(super) fn decode(params: &SpokesParams, desc: &str) -> Result<SpokesPuzzle, DescriptorError> {
    let len = params.width * params.height;
    let mut hubs = Vec::with_capacity(len);
    for ch in desc.chars() {
        if hubs.len() == len {
            return Err(DescriptorError::TooLong { section: SECTION });
        }
        let clue = match u8::try_from(ch) {
            Ok(b'X') => HubClue::Block,
            Ok(b @ b'0'..=b'8') => HubClue::Number(b - b'0'),
            _ => {
                return Err(DescriptorError::InvalidCharacter {
                    section: SECTION,
                    ch,
                });
            }
        };
        hubs.push(clue);
    }
    let hubs = Grid::from_vec(params.width, params.height, hubs)
        .ok_or(DescriptorError::TooShort { section: SECTION })?;
    Ok(SpokesPuzzle { hubs })
}
