use std::{
    fmt::{self, Display},
    str::FromStr,
};

use gridlace_core::{Difficulty, ParamsError, Preset, PuzzleEngine as _};

use super::Salad;
use crate::parse::split_number;

/// How symbols are clued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::IsVariant)]
pub enum SaladMode {
    /// ABC End View: letters, with border clues naming the first letter seen
    /// from each edge.
    #[default]
    Letters,
    /// Number Ball: digits, with circles marking cells that hold a number.
    Numbers,
}

impl SaladMode {
    const fn to_char(self) -> char {
        match self {
            Self::Letters => 'L',
            Self::Numbers => 'B',
        }
    }

    /// Returns the character displaying `symbol` in this mode.
    #[must_use]
    pub fn symbol_char(self, symbol: u8) -> char {
        let base = match self {
            Self::Letters => b'A' - 1,
            Self::Numbers => b'0',
        };
        char::from(base + symbol)
    }
}

/// Salad parameters.
///
/// Printed as `<order>n<symbols><L|B>d<difficulty>`, e.g. `5n3Lde`.
///
/// # Examples
///
/// ```
/// use gridlace_core::Difficulty;
/// use gridlace_puzzles::salad::{SaladMode, SaladParams};
///
/// let params: SaladParams = "6n4Bdh".parse()?;
/// assert_eq!(params.order, 6);
/// assert_eq!(params.symbols, 4);
/// assert_eq!(params.mode, SaladMode::Numbers);
/// assert_eq!(params.difficulty, Difficulty::Hard);
/// assert_eq!(params.to_string(), "6n4Bdh");
/// # Ok::<(), gridlace_core::ParamsError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SaladParams {
    /// Side length of the grid.
    pub order: usize,
    /// Number of distinct symbols per row and column. The remaining
    /// `order - symbols` cells of each row and column are holes.
    pub symbols: usize,
    /// Clue style.
    pub mode: SaladMode,
    /// Target difficulty.
    pub difficulty: Difficulty,
}

impl SaladParams {
    /// Largest supported side length.
    pub const MAX_ORDER: usize = 16;
    /// Largest supported symbol count.
    pub const MAX_SYMBOLS: usize = 9;

    /// Creates parameters.
    #[must_use]
    pub const fn new(order: usize, symbols: usize, mode: SaladMode, difficulty: Difficulty) -> Self {
        Self {
            order,
            symbols,
            mode,
            difficulty,
        }
    }

    /// Returns the number of holes per row and column.
    #[must_use]
    pub const fn holes(&self) -> usize {
        self.order - self.symbols
    }

    pub(crate) fn validate(&self) -> Result<(), ParamsError> {
        if self.symbols < 2 {
            return Err(ParamsError::TooSmall {
                what: "symbols",
                min: 2,
            });
        }
        if self.symbols >= self.order {
            return Err(ParamsError::SymbolsNotBelowSize);
        }
        if self.order < 3 {
            return Err(ParamsError::TooSmall {
                what: "size",
                min: 3,
            });
        }
        if self.symbols > Self::MAX_SYMBOLS {
            return Err(ParamsError::TooLarge {
                what: "symbols",
                max: Self::MAX_SYMBOLS,
            });
        }
        if self.order > Self::MAX_ORDER {
            return Err(ParamsError::TooLarge {
                what: "size",
                max: Self::MAX_ORDER,
            });
        }
        self.difficulty
            .ensure_supported(Salad::NAME, Salad::difficulties())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub(crate) const fn symbol_count(&self) -> u8 {
        self.symbols as u8
    }
}

impl Default for SaladParams {
    fn default() -> Self {
        Self::new(4, 3, SaladMode::Letters, Difficulty::Easy)
    }
}

impl Display for SaladParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}n{}{}d{}",
            self.order,
            self.symbols,
            self.mode.to_char(),
            self.difficulty.to_char()
        )
    }
}

impl FromStr for SaladParams {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParamsError::Malformed {
            input: s.to_owned(),
        };
        let (order, rest) = split_number(s).ok_or_else(malformed)?;
        let rest = rest.strip_prefix('n').ok_or_else(malformed)?;
        let (symbols, rest) = split_number(rest).ok_or_else(malformed)?;
        let (mode, rest) = if let Some(rest) = rest.strip_prefix('L') {
            (SaladMode::Letters, rest)
        } else if let Some(rest) = rest.strip_prefix('B') {
            (SaladMode::Numbers, rest)
        } else {
            (SaladMode::Letters, rest)
        };
        let difficulty = match rest.strip_prefix('d') {
            Some(d) => d.parse()?,
            None if rest.is_empty() => Difficulty::Easy,
            None => return Err(malformed()),
        };
        Ok(Self::new(order, symbols, mode, difficulty))
    }
}

pub(super) fn presets() -> Vec<Preset<SaladParams>> {
    use SaladMode::{Letters, Numbers};

    [
        (4, 3, Letters),
        (5, 3, Letters),
        (5, 3, Numbers),
        (5, 4, Letters),
        (6, 3, Numbers),
        (6, 4, Letters),
        (6, 4, Numbers),
        (7, 4, Letters),
        (7, 4, Numbers),
        (8, 5, Letters),
        (8, 5, Numbers),
    ]
    .into_iter()
    .map(|(order, symbols, mode)| {
        let params = SaladParams::new(order, symbols, mode, Difficulty::Easy);
        let (kind, last) = match mode {
            Letters => ("Letters", 'A'),
            Numbers => ("Numbers", '1'),
        };
        let name = format!(
            "{kind}: {order}x{order} {last}~{}",
            mode.symbol_char(params.symbol_count())
        );
        Preset::new(name, params)
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_validate_messages() {
        let check = |s: &str| s.parse::<SaladParams>().unwrap().validate();
        assert_eq!(
            check("5n1L").unwrap_err().to_string(),
            "symbols must be at least 2"
        );
        assert_eq!(
            check("4n4L").unwrap_err().to_string(),
            "symbols must be lower than the size"
        );
        assert_eq!(
            check("12n10L").unwrap_err().to_string(),
            "symbols must be no more than 9"
        );
        assert_eq!(
            check("17n9B").unwrap_err().to_string(),
            "size must be no more than 16"
        );
        assert!(matches!(
            check("5n3Ldn"),
            Err(ParamsError::UnsupportedDifficulty { .. })
        ));
        assert!(check("5n3Ldh").is_ok());
    }

    #[test]
    fn test_parse_defaults_and_errors() {
        assert_eq!(
            "5n3".parse::<SaladParams>(),
            Ok(SaladParams::new(5, 3, SaladMode::Letters, Difficulty::Easy))
        );
        assert!("5x3".parse::<SaladParams>().is_err());
        assert!("n3".parse::<SaladParams>().is_err());
        assert!("5n3Lq".parse::<SaladParams>().is_err());
        assert!(matches!(
            "5n3Ldz".parse::<SaladParams>(),
            Err(ParamsError::UnknownDifficulty { .. })
        ));
    }

    #[test]
    fn test_preset_names() {
        let presets = presets();
        assert_eq!(presets.len(), 11);
        assert_eq!(presets[0].name, "Letters: 4x4 A~C");
        assert_eq!(presets[2].name, "Numbers: 5x5 1~3");
        assert!(presets.iter().all(|p| p.params.validate().is_ok()));
    }

    proptest! {
        #[test]
        fn test_params_round_trip(
            order in 3_usize..=16,
            symbols in 2_usize..=9,
            numbers: bool,
            hard: bool,
        ) {
            let mode = if numbers { SaladMode::Numbers } else { SaladMode::Letters };
            let difficulty = if hard { Difficulty::Hard } else { Difficulty::Easy };
            let params = SaladParams::new(order, symbols, mode, difficulty);
            prop_assert_eq!(params.to_string().parse::<SaladParams>(), Ok(params));
        }

        #[test]
        fn test_parse_never_panics(s in "\\PC{0,12}") {
            let _ = s.parse::<SaladParams>();
        }
    }
}
