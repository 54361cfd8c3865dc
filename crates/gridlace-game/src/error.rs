use gridlace_core::{DescriptorError, MoveError, ParamsError};

/// Errors raised while creating or driving a [`Game`](crate::Game).
#[derive(
    Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From,
    derive_more::IsVariant,
)]
pub enum GameError {
    /// The parameters are out of bounds.
    #[display("invalid parameters: {_0}")]
    Params(ParamsError),
    /// The descriptor could not be decoded.
    #[display("invalid descriptor: {_0}")]
    Descriptor(DescriptorError),
    /// A move was rejected.
    #[display("invalid move: {_0}")]
    Move(MoveError),
    /// The puzzle has no unique solution to load.
    #[display("the puzzle cannot be solved")]
    #[from(ignore)]
    Unsolvable,
}
