use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use gridlace_core::Difficulty;
use gridlace_generator::{PuzzleSeed, Symmetry};

/// Generate, solve and play gridlace puzzles.
#[derive(Debug, Parser)]
#[command(name = "gridlace", author, version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

/// The puzzle engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EngineKind {
    /// Latin square with holes (ABC End View / Number Ball).
    Salad,
    /// Latin square with corner arithmetic clues.
    Mathrax,
    /// Hubs joined into one network of lines.
    Spokes,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the presets of an engine.
    Presets {
        /// Puzzle engine.
        engine: EngineKind,
    },
    /// Generate puzzles.
    Generate(GenerateArgs),
    /// Solve a puzzle given as `<params>:<descriptor>`.
    Solve {
        /// Puzzle engine.
        engine: EngineKind,
        /// Game id, e.g. `6dt:...`.
        id: String,
        /// Hardest difficulty the solver may use.
        #[arg(long, value_name = "DIFFICULTY", default_value = "recursive")]
        max: Difficulty,
    },
    /// Apply `;`-separated moves to a puzzle and show the result.
    Play {
        /// Puzzle engine.
        engine: EngineKind,
        /// Game id, e.g. `6dt:...`.
        id: String,
        /// Moves to apply, e.g. `R0,0,3;P1,0,2`.
        #[arg(default_value = "")]
        moves: String,
        /// Load the solution after the moves.
        #[arg(long)]
        solve: bool,
    },
}

#[derive(Debug, ClapArgs)]
pub struct GenerateArgs {
    /// Puzzle engine.
    pub engine: EngineKind,

    /// Params string. Defaults to the first preset.
    #[arg(short, long, conflicts_with = "preset")]
    pub params: Option<String>,

    /// Preset name, e.g. "6x6 Tricky" (case-insensitive).
    #[arg(long)]
    pub preset: Option<String>,

    /// Seed as 64 hex digits. Reproduces the same puzzles.
    #[arg(long)]
    pub seed: Option<PuzzleSeed>,

    /// Number of puzzles, generated in parallel.
    #[arg(short = 'n', long, value_name = "COUNT", default_value_t = 1)]
    pub count: usize,

    /// Symmetry of the remaining clues.
    #[arg(long, default_value = "none")]
    pub symmetry: Symmetry,

    /// Give up after this many attempts per puzzle.
    #[arg(long, value_name = "COUNT")]
    pub max_attempts: Option<usize>,

    /// Also print each puzzle as text.
    #[arg(long)]
    pub show: bool,
}
