use std::{
    fmt::{self, Display},
    str::FromStr,
};

use gridlace_core::{Difficulty, ParamsError, Preset, PuzzleEngine as _};

use super::Mathrax;
use crate::parse::split_number;

bitflags::bitflags! {
    /// Clue kinds the generator may place.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClueOptions: u8 {
        /// Sum clues.
        const ADD = 0b00_0001;
        /// Difference clues.
        const SUB = 0b00_0010;
        /// Product clues.
        const MUL = 0b00_0100;
        /// Quotient clues.
        const DIV = 0b00_1000;
        /// Equality clues, written as a zero difference.
        const EQUAL = 0b01_0000;
        /// Even and odd clues.
        const PARITY = 0b10_0000;
    }
}

const OPTION_CHARS: [(ClueOptions, char); 6] = [
    (ClueOptions::ADD, 'A'),
    (ClueOptions::SUB, 'S'),
    (ClueOptions::MUL, 'M'),
    (ClueOptions::DIV, 'D'),
    (ClueOptions::EQUAL, 'E'),
    (ClueOptions::PARITY, 'O'),
];

/// Mathrax parameters.
///
/// Printed as `<order>d<difficulty>` followed by the enabled clue kinds
/// (`A`, `S`, `M`, `D`, `E`, `O`) unless all of them are enabled.
///
/// # Examples
///
/// ```
/// use gridlace_core::Difficulty;
/// use gridlace_puzzles::mathrax::{ClueOptions, MathraxParams};
///
/// let params: MathraxParams = "6dtAM".parse()?;
/// assert_eq!(params.order, 6);
/// assert_eq!(params.difficulty, Difficulty::Tricky);
/// assert_eq!(params.options, ClueOptions::ADD | ClueOptions::MUL);
///
/// let all: MathraxParams = "5dn".parse()?;
/// assert_eq!(all.options, ClueOptions::all());
/// assert_eq!(all.to_string(), "5dn");
/// # Ok::<(), gridlace_core::ParamsError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MathraxParams {
    /// Side length of the grid; values run from 1 to `order`.
    pub order: usize,
    /// Target difficulty.
    pub difficulty: Difficulty,
    /// Clue kinds used by the generator.
    pub options: ClueOptions,
}

impl MathraxParams {
    /// Smallest supported side length.
    pub const MIN_ORDER: usize = 3;
    /// Largest supported side length.
    pub const MAX_ORDER: usize = 9;

    /// Creates parameters with every clue kind enabled.
    #[must_use]
    pub const fn new(order: usize, difficulty: Difficulty) -> Self {
        Self {
            order,
            difficulty,
            options: ClueOptions::all(),
        }
    }

    /// Returns a copy restricted to `options`.
    #[must_use]
    pub const fn with_options(mut self, options: ClueOptions) -> Self {
        self.options = options;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ParamsError> {
        if self.order < Self::MIN_ORDER {
            return Err(ParamsError::TooSmall {
                what: "size",
                min: Self::MIN_ORDER,
            });
        }
        if self.order > Self::MAX_ORDER {
            return Err(ParamsError::TooLarge {
                what: "size",
                max: Self::MAX_ORDER,
            });
        }
        self.difficulty
            .ensure_supported(Mathrax::NAME, Mathrax::difficulties())?;
        if self.options.is_empty() {
            return Err(ParamsError::NoClueTypes);
        }
        Ok(())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub(crate) const fn order_u8(&self) -> u8 {
        self.order as u8
    }
}

impl Default for MathraxParams {
    fn default() -> Self {
        Self::new(5, Difficulty::Easy)
    }
}

impl Display for MathraxParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.order, self.difficulty.to_char())?;
        if self.options != ClueOptions::all() {
            for (option, c) in OPTION_CHARS {
                if self.options.contains(option) {
                    write!(f, "{c}")?;
                }
            }
        }
        Ok(())
    }
}

impl FromStr for MathraxParams {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParamsError::Malformed {
            input: s.to_owned(),
        };
        let (order, mut rest) = split_number(s).ok_or_else(malformed)?;
        let mut difficulty = Difficulty::Easy;
        if let Some(after) = rest.strip_prefix('d') {
            let mut chars = after.chars();
            let c = chars.next().ok_or_else(malformed)?;
            difficulty = Difficulty::from_char(c).ok_or_else(|| ParamsError::UnknownDifficulty {
                value: c.to_string(),
            })?;
            rest = chars.as_str();
        }
        let mut options = ClueOptions::empty();
        for (option, c) in OPTION_CHARS {
            if let Some(after) = rest.strip_prefix(c) {
                options |= option;
                rest = after;
            }
        }
        if !rest.is_empty() {
            return Err(malformed());
        }
        if options.is_empty() {
            options = ClueOptions::all();
        }
        Ok(Self {
            order,
            difficulty,
            options,
        })
    }
}

pub(super) fn presets() -> Vec<Preset<MathraxParams>> {
    use Difficulty::{Easy, Normal, Tricky};

    [
        (5, Easy),
        (5, Normal),
        (5, Tricky),
        (6, Easy),
        (6, Normal),
        (6, Tricky),
        (7, Normal),
        (8, Normal),
        (9, Normal),
    ]
    .into_iter()
    .map(|(order, difficulty)| {
        Preset::new(
            format!("{order}x{order} {difficulty}"),
            MathraxParams::new(order, difficulty),
        )
    })
    .collect()
}
