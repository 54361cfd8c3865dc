use gridlace_core::ParamsError;

/// Errors returned by [`PuzzleGenerator`](crate::PuzzleGenerator).
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum GenerateError {
    /// The parameters were rejected before generation started.
    #[display("invalid parameters: {_0}")]
    InvalidParams(ParamsError),
    /// The attempt budget ran out.
    #[display("no puzzle found in {attempts} attempts")]
    #[from(ignore)]
    Exhausted {
        /// Number of attempts made.
        attempts: usize,
    },
    /// The system random source failed while drawing a fresh seed.
    #[display("failed to draw a random seed: {_0}")]
    Entropy(getrandom::Error),
}
