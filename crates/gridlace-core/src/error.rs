//! Error taxonomies shared by every puzzle engine.

use crate::Difficulty;

/// A parameter model failed validation.
///
/// Reported before any generation attempt.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParamsError {
    /// A dimension or count is below its lower bound.
    #[display("{what} must be at least {min}")]
    TooSmall {
        /// The parameter name.
        what: &'static str,
        /// The smallest accepted value.
        min: usize,
    },
    /// A dimension or count is above its upper bound.
    #[display("{what} must be no more than {max}")]
    TooLarge {
        /// The parameter name.
        what: &'static str,
        /// The largest accepted value.
        max: usize,
    },
    /// The symbol count does not leave room for holes.
    #[display("symbols must be lower than the size")]
    SymbolsNotBelowSize,
    /// No clue type is enabled.
    #[display("at least one clue type must be enabled")]
    NoClueTypes,
    /// The difficulty name or code is not recognised.
    #[display("unknown difficulty `{value}`")]
    UnknownDifficulty {
        /// The rejected text.
        value: String,
    },
    /// The engine has no rules for this tier.
    #[display("difficulty {difficulty} is not supported by {engine}")]
    UnsupportedDifficulty {
        /// The engine name.
        engine: &'static str,
        /// The rejected tier.
        difficulty: Difficulty,
    },
    /// The params string could not be parsed.
    #[display("invalid parameter string `{input}`")]
    Malformed {
        /// The rejected text.
        input: String,
    },
}

/// A descriptor string could not be decoded.
///
/// Always detected deterministically at decode time; never corrected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DescriptorError {
    /// More positions were described than the section holds.
    #[display("{section} description is too long")]
    TooLong {
        /// The section name.
        section: &'static str,
    },
    /// Fewer positions were described than the section holds.
    #[display("{section} description is too short")]
    TooShort {
        /// The section name.
        section: &'static str,
    },
    /// A character outside the section's alphabet.
    #[display("{section} description contains invalid character `{ch}`")]
    InvalidCharacter {
        /// The section name.
        section: &'static str,
        /// The rejected character.
        ch: char,
    },
    /// A digit or clue magnitude outside the accepted range.
    #[display("{section} clue {value} is out of range")]
    OutOfRange {
        /// The section name.
        section: &'static str,
        /// The rejected value.
        value: u32,
    },
    /// A clue contradicts the rest of the puzzle.
    #[display("{section} description is inconsistent")]
    Inconsistent {
        /// The section name.
        section: &'static str,
    },
}

/// A move was rejected.
///
/// A rejected move has no effect: the previous state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// The move string is empty.
    #[display("empty move")]
    Empty,
    /// The move token does not follow the grammar.
    #[display("malformed move `{token}`")]
    Malformed {
        /// The rejected token.
        token: String,
    },
    /// The move tag is not known to the engine.
    #[display("unknown move tag `{tag}`")]
    UnknownTag {
        /// The rejected tag.
        tag: char,
    },
    /// A coordinate lies outside the grid.
    #[display("coordinate ({x}, {y}) is out of range")]
    OutOfRange {
        /// The column or hub index.
        x: usize,
        /// The row or direction.
        y: usize,
    },
    /// The value is not accepted by this engine or move.
    #[display("value `{value}` is not valid here")]
    InvalidValue {
        /// The rejected value.
        value: char,
    },
    /// The cell is a given, or already holds a different value.
    #[display("cell ({x}, {y}) is immutable/occupied")]
    CellLocked {
        /// The column.
        x: usize,
        /// The row.
        y: usize,
    },
    /// A solution move does not cover the grid.
    #[display("solution has {actual} cells, expected {expected}")]
    SolutionLength {
        /// The grid size.
        expected: usize,
        /// The number of cells given.
        actual: usize,
    },
}
