//! Difficulty tiers, solver outcomes, and validation status.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use crate::ParamsError;

/// A difficulty tier bounding which deduction rules the solver may use.
///
/// Tiers are totally ordered: a solver capped at a tier may use every rule of
/// that tier and of all lower tiers. The same ordering is used by the generator
/// to certify the minimum skill a puzzle requires.
///
/// # Examples
///
/// ```
/// use gridlace_core::Difficulty;
///
/// assert!(Difficulty::Easy < Difficulty::Tricky);
/// assert_eq!(Difficulty::from_char('t'), Some(Difficulty::Tricky));
/// assert_eq!(Difficulty::Hard.to_char(), 'h');
/// assert_eq!("normal".parse::<Difficulty>()?, Difficulty::Normal);
/// # Ok::<(), gridlace_core::ParamsError>(())
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::IsVariant,
)]
pub enum Difficulty {
    /// Direct elimination and single placements only.
    Easy,
    /// Adds set elimination or stronger clue propagation.
    Normal,
    /// Adds hypothesis testing bounded at a lower tier.
    Tricky,
    /// Adds deeper hypothesis testing.
    Hard,
    /// Unbounded recursive search with solution counting.
    Recursive,
}

impl Difficulty {
    /// All tiers from easiest to hardest.
    pub const ALL: [Self; 5] = [
        Self::Easy,
        Self::Normal,
        Self::Tricky,
        Self::Hard,
        Self::Recursive,
    ];

    /// Returns the single-character code used in params strings.
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Self::Easy => 'e',
            Self::Normal => 'n',
            Self::Tricky => 't',
            Self::Hard => 'h',
            Self::Recursive => 'r',
        }
    }

    /// Parses a single-character code.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.to_char() == c)
    }

    /// Returns the human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Normal => "Normal",
            Self::Tricky => "Tricky",
            Self::Hard => "Hard",
            Self::Recursive => "Recursive",
        }
    }

    /// Returns the highest tier in `supported` that is strictly below `self`.
    ///
    /// Used by the generator's difficulty floor check. Returns `None` when
    /// `self` is already the lowest supported tier.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridlace_core::Difficulty;
    ///
    /// let supported = [Difficulty::Easy, Difficulty::Tricky, Difficulty::Hard];
    /// assert_eq!(Difficulty::Hard.next_lower(&supported), Some(Difficulty::Tricky));
    /// assert_eq!(Difficulty::Tricky.next_lower(&supported), Some(Difficulty::Easy));
    /// assert_eq!(Difficulty::Easy.next_lower(&supported), None);
    /// ```
    #[must_use]
    pub fn next_lower(self, supported: &[Self]) -> Option<Self> {
        supported.iter().copied().filter(|d| *d < self).max()
    }

    /// Checks that `self` is one of the tiers `engine` supports.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::UnsupportedDifficulty`] otherwise.
    pub fn ensure_supported(
        self,
        engine: &'static str,
        supported: &[Self],
    ) -> Result<(), ParamsError> {
        if supported.contains(&self) {
            Ok(())
        } else {
            Err(ParamsError::UnsupportedDifficulty {
                engine,
                difficulty: self,
            })
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next())
            && let Some(d) = Self::from_char(c)
        {
            return Ok(d);
        }
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParamsError::UnknownDifficulty {
                value: s.to_owned(),
            })
    }
}

/// The result of running a solver with a difficulty cap.
///
/// The sentinel variants are produced only by solvers and are never stored in
/// puzzle parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum SolveOutcome {
    /// The puzzle was solved; the payload is the hardest tier that was needed.
    Solved(Difficulty),
    /// The allowed rules ran out before the puzzle was complete.
    Unfinished,
    /// More than one solution exists.
    Ambiguous,
    /// No solution exists.
    Impossible,
}

impl SolveOutcome {
    /// Returns the achieved tier if the puzzle was solved.
    #[must_use]
    pub const fn difficulty(self) -> Option<Difficulty> {
        match self {
            Self::Solved(d) => Some(d),
            _ => None,
        }
    }
}

impl Display for SolveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solved(d) => write!(f, "solved ({d})"),
            Self::Unfinished => f.write_str("unfinished"),
            Self::Ambiguous => f.write_str("ambiguous"),
            Self::Impossible => f.write_str("impossible"),
        }
    }
}

/// Validation status of a grid state.
///
/// Ordered from worst to best so that combining partial checks is `min`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::IsVariant,
)]
pub enum Status {
    /// A clue, count, or connectivity constraint is violated.
    Invalid,
    /// No violation, but the grid is not filled.
    Incomplete,
    /// Filled and every clue is satisfied.
    Complete,
}

impl Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Invalid => "invalid",
            Self::Incomplete => "incomplete",
            Self::Complete => "complete",
        })
    }
}
