//! The contract every puzzle engine implements.

use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

use crate::{DescriptorError, Difficulty, MoveError, ParamsError, Preset, SolveOutcome, Status};

/// The random number generator handed to engines during generation.
///
/// A concrete type keeps generation reproducible from a seed across platforms.
pub type PuzzleRng = rand_pcg::Pcg64;

bitflags::bitflags! {
    /// Per-cell annotations of a grid state.
    ///
    /// Error bits are recomputed from scratch by every validation pass.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u8 {
        /// The cell holds a given and cannot be edited.
        const IMMUTABLE = 0b0000_0001;
        /// The cell value conflicts with its row, column, or count.
        const ERROR = 0b0000_0010;
        /// The clue towards the upper-left neighbour is violated.
        const ERROR_TOP_LEFT = 0b0000_0100;
        /// The clue towards the upper-right neighbour is violated.
        const ERROR_TOP_RIGHT = 0b0000_1000;
        /// The clue towards the lower-left neighbour is violated.
        const ERROR_BOTTOM_LEFT = 0b0001_0000;
        /// The clue towards the lower-right neighbour is violated.
        const ERROR_BOTTOM_RIGHT = 0b0010_0000;
        /// Every error bit.
        const ERRORS = Self::ERROR.bits()
            | Self::ERROR_TOP_LEFT.bits()
            | Self::ERROR_TOP_RIGHT.bits()
            | Self::ERROR_BOTTOM_LEFT.bits()
            | Self::ERROR_BOTTOM_RIGHT.bits();
    }
}

impl CellFlags {
    /// Returns `true` if any error bit is set.
    #[must_use]
    pub const fn has_error(self) -> bool {
        self.intersects(Self::ERRORS)
    }
}

/// A two-dimensional group of clue slots stripped together by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClueLayer {
    /// A short name used in log messages.
    pub name: &'static str,
    /// Number of slot columns.
    pub width: usize,
    /// Number of slot rows.
    pub height: usize,
    /// Whether symmetry constraints apply to this layer.
    pub symmetric: bool,
}

impl ClueLayer {
    /// Returns the number of slots in the layer.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.width * self.height
    }

    /// Returns `true` if the layer has no slots.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One removable clue position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ClueSlot {
    /// Index into [`PuzzleEngine::clue_layers`].
    pub layer: usize,
    /// Column within the layer.
    pub x: usize,
    /// Row within the layer.
    pub y: usize,
}

/// The result of a solve call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveReport<S> {
    /// How far the solver got.
    pub outcome: SolveOutcome,
    /// The solved content, present only when the outcome is
    /// [`SolveOutcome::Solved`].
    pub solution: Option<S>,
}

impl<S> SolveReport<S> {
    /// A report for a puzzle that was solved at `difficulty`.
    #[must_use]
    pub const fn solved(difficulty: Difficulty, solution: S) -> Self {
        Self {
            outcome: SolveOutcome::Solved(difficulty),
            solution: Some(solution),
        }
    }

    /// A report without a solution.
    #[must_use]
    pub const fn unsolved(outcome: SolveOutcome) -> Self {
        Self {
            outcome,
            solution: None,
        }
    }

    /// Returns `true` if the puzzle reached a complete, valid state.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.outcome.is_solved()
    }
}

/// A puzzle type: parameters, descriptor codec, solver, generator hooks, and
/// move executor.
///
/// Implementors are zero-sized marker types. The generic generator and game
/// session are written once against this trait.
pub trait PuzzleEngine: Sized + 'static {
    /// Human-readable engine name.
    const NAME: &'static str;

    /// Shape, difficulty and option flags. Parsed from and printed to the
    /// params string.
    type Params: Clone + Debug + Eq + Display + FromStr<Err = ParamsError> + Send + Sync;
    /// Puzzle content as carried by a descriptor.
    type Puzzle: Clone + Debug + Eq + Send + Sync;
    /// A solved grid.
    type Solution: Clone + Debug + Eq + Send + Sync;
    /// Mutable generator working copy, finished into a [`Self::Puzzle`].
    type Draft: Clone + Debug;
    /// Mutable play state.
    type State: Clone + Debug + Eq;
    /// A parsed move token.
    type Move: Clone + Debug + Eq;

    /// Difficulty tiers this engine has rules for, easiest first.
    fn difficulties() -> &'static [Difficulty];

    /// Named parameter presets, in menu order.
    fn presets() -> Vec<Preset<Self::Params>>;

    /// Checks parameters against hard bounds.
    ///
    /// # Errors
    ///
    /// Returns a descriptive [`ParamsError`] for any violation.
    fn validate_params(params: &Self::Params) -> Result<(), ParamsError>;

    /// Returns the target difficulty of `params`.
    fn difficulty(params: &Self::Params) -> Difficulty;

    /// Encodes puzzle content as a descriptor string.
    fn encode(params: &Self::Params, puzzle: &Self::Puzzle) -> String;

    /// Decodes a descriptor string.
    ///
    /// # Errors
    ///
    /// Returns a [`DescriptorError`] for malformed or length-mismatched input.
    fn decode(params: &Self::Params, desc: &str) -> Result<Self::Puzzle, DescriptorError>;

    /// Solves `puzzle` using rules up to `max`.
    fn solve(
        params: &Self::Params,
        puzzle: &Self::Puzzle,
        max: Difficulty,
    ) -> SolveReport<Self::Solution>;

    /// Builds a fully clued draft from a random filled solution.
    fn seed(params: &Self::Params, rng: &mut PuzzleRng) -> Self::Draft;

    /// Clue layers in strip order.
    fn clue_layers(params: &Self::Params) -> Vec<ClueLayer>;

    /// Weakens one clue slot of `draft` by one step.
    ///
    /// Returns `false` if the slot holds nothing to weaken or the removal is
    /// refused.
    fn weaken(params: &Self::Params, draft: &mut Self::Draft, slot: ClueSlot) -> bool;

    /// Returns `true` if `slot` still shows a clue in `draft`.
    ///
    /// A symmetric orbit keeps the same answer for all of its slots.
    fn is_clued(params: &Self::Params, draft: &Self::Draft, slot: ClueSlot) -> bool;

    /// Converts a draft into puzzle content.
    fn finish(params: &Self::Params, draft: &Self::Draft) -> Self::Puzzle;

    /// Quality hook: returns `false` to discard an otherwise valid puzzle.
    fn accept(params: &Self::Params, puzzle: &Self::Puzzle) -> bool {
        let _ = (params, puzzle);
        true
    }

    /// Creates the initial play state of a puzzle.
    fn new_state(params: &Self::Params, puzzle: &Self::Puzzle) -> Self::State;

    /// Parses one move token.
    ///
    /// # Errors
    ///
    /// Returns a [`MoveError`] for malformed tokens, unknown tags, and
    /// out-of-range coordinates or values.
    fn parse_move(params: &Self::Params, token: &str) -> Result<Self::Move, MoveError>;

    /// Applies a parsed move to `state`.
    ///
    /// On error `state` may be partially modified; callers apply moves to a
    /// clone.
    ///
    /// # Errors
    ///
    /// Returns a [`MoveError`] if the move is not allowed in this state.
    fn apply_move(
        params: &Self::Params,
        puzzle: &Self::Puzzle,
        state: &mut Self::State,
        mv: Self::Move,
    ) -> Result<(), MoveError>;

    /// Returns `true` for moves that load a full solution.
    fn loads_solution(mv: &Self::Move) -> bool;

    /// Recomputes error flags and returns the status of `state`.
    ///
    /// Never searches.
    fn check(params: &Self::Params, puzzle: &Self::Puzzle, state: &mut Self::State) -> Status;

    /// Returns a move string loading the solution, or `None` if the puzzle
    /// cannot be solved.
    fn solution_move(params: &Self::Params, puzzle: &Self::Puzzle) -> Option<String>;

    /// Renders `state` as plain text.
    fn text_format(params: &Self::Params, puzzle: &Self::Puzzle, state: &Self::State) -> String;
}
