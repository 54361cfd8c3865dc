use gridlace_core::{DescriptorError, ParamsError};
use gridlace_game::GameError;
use gridlace_generator::GenerateError;

/// Errors reported by the `gridlace` command.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum CliError {
    /// The params string was rejected.
    #[display("invalid parameters: {_0}")]
    Params(ParamsError),
    /// The descriptor could not be decoded.
    #[display("invalid descriptor: {_0}")]
    Descriptor(DescriptorError),
    /// Creating or playing the game failed.
    Game(GameError),
    /// Generation failed.
    Generate(GenerateError),
    /// A game id lacks the `:` between params and descriptor.
    #[display("game id {id:?} must look like <params>:<descriptor>")]
    #[from(ignore)]
    MissingSeparator {
        /// The offending id.
        id: String,
    },
    /// No preset has the requested name.
    #[display("unknown preset {name:?}")]
    #[from(ignore)]
    UnknownPreset {
        /// The requested name.
        name: String,
    },
    /// A count argument was zero.
    #[display("--count must be at least 1")]
    #[from(ignore)]
    ZeroCount,
}
