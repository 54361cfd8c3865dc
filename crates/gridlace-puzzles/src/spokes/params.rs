use std::{
    fmt::{self, Display},
    str::FromStr,
};

use gridlace_core::{Difficulty, ParamsError, Preset, PuzzleEngine as _};

use super::Spokes;
use crate::parse::split_number;

/// Spokes parameters, printed as `<width>x<height>d<difficulty>`.
///
/// The height may be omitted when parsing, giving a square grid.
///
/// # Examples
///
/// ```
/// use gridlace_core::Difficulty;
/// use gridlace_puzzles::spokes::SpokesParams;
///
/// let params: SpokesParams = "5x4dt".parse()?;
/// assert_eq!((params.width, params.height), (5, 4));
/// assert_eq!(params.difficulty, Difficulty::Tricky);
///
/// let square: SpokesParams = "6".parse()?;
/// assert_eq!(square.to_string(), "6x6de");
/// # Ok::<(), gridlace_core::ParamsError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpokesParams {
    /// Number of hub columns.
    pub width: usize,
    /// Number of hub rows.
    pub height: usize,
    /// Target difficulty.
    pub difficulty: Difficulty,
}

impl SpokesParams {
    /// Smallest supported width and height.
    pub const MIN_SIZE: usize = 2;
    /// Largest supported width and height.
    pub const MAX_SIZE: usize = 32;

    /// Creates parameters.
    #[must_use]
    pub const fn new(width: usize, height: usize, difficulty: Difficulty) -> Self {
        Self {
            width,
            height,
            difficulty,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ParamsError> {
        for (what, value) in [("width", self.width), ("height", self.height)] {
            if value < Self::MIN_SIZE {
                return Err(ParamsError::TooSmall {
                    what,
                    min: Self::MIN_SIZE,
                });
            }
            if value > Self::MAX_SIZE {
                return Err(ParamsError::TooLarge {
                    what,
                    max: Self::MAX_SIZE,
                });
            }
        }
        self.difficulty
            .ensure_supported(Spokes::NAME, Spokes::difficulties())
    }
}

impl Default for SpokesParams {
    fn default() -> Self {
        Self::new(6, 6, Difficulty::Easy)
    }
}

impl Display for SpokesParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}d{}",
            self.width,
            self.height,
            self.difficulty.to_char()
        )
    }
}

impl FromStr for SpokesParams {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParamsError::Malformed {
            input: s.to_owned(),
        };
        let (width, mut rest) = split_number(s).ok_or_else(malformed)?;
        let mut height = width;
        if let Some(after) = rest.strip_prefix('x') {
            (height, rest) = split_number(after).ok_or_else(malformed)?;
        }
        let mut difficulty = Difficulty::Easy;
        if let Some(after) = rest.strip_prefix('d') {
            let mut chars = after.chars();
            let c = chars.next().ok_or_else(malformed)?;
            difficulty = Difficulty::from_char(c).ok_or_else(|| ParamsError::UnknownDifficulty {
                value: c.to_string(),
            })?;
            rest = chars.as_str();
        }
        if !rest.is_empty() {
            return Err(malformed());
        }
        Ok(Self::new(width, height, difficulty))
    }
}

pub(super) fn presets() -> Vec<Preset<SpokesParams>> {
    use Difficulty::{Easy, Hard, Tricky};

    [4, 6]
        .into_iter()
        .flat_map(|size| [Easy, Tricky, Hard].map(|d| SpokesParams::new(size, size, d)))
        .map(|params| {
            Preset::new(
                format!("{}x{} {}", params.width, params.height, params.difficulty),
                params,
            )
        })
        .collect()
}
