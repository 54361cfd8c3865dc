use std::fmt::{self, Debug};

use gridlace_core::{MoveError, PuzzleEngine, Status};
use gridlace_generator::GeneratedPuzzle;

use crate::GameError;

/// A play session of one puzzle.
///
/// The session holds the puzzle content, which never changes, and the play
/// state that moves act on. After every batch of moves the engine's
/// validation pass recomputes error flags and the [`Status`].
///
/// Two sticky bits record how the session ended: `completed` once the state
/// has been [`Status::Complete`], and `cheated` if that happened through a
/// solution load.
pub struct Game<E: PuzzleEngine> {
    params: E::Params,
    puzzle: E::Puzzle,
    state: E::State,
    status: Status,
    completed: bool,
    cheated: bool,
}

impl<E: PuzzleEngine> Game<E> {
    /// Starts a session from a params string and a descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Params`] or [`GameError::Descriptor`] if either
    /// input is rejected.
    pub fn new(params: E::Params, descriptor: &str) -> Result<Self, GameError> {
        E::validate_params(&params)?;
        let puzzle = E::decode(&params, descriptor)?;
        Ok(Self::from_puzzle(params, puzzle))
    }

    /// Starts a session from decoded puzzle content.
    #[must_use]
    pub fn from_puzzle(params: E::Params, puzzle: E::Puzzle) -> Self {
        let mut state = E::new_state(&params, &puzzle);
        let status = E::check(&params, &puzzle, &mut state);
        Self {
            params,
            puzzle,
            state,
            status,
            completed: false,
            cheated: false,
        }
    }

    /// Starts a session from a freshly generated puzzle.
    #[must_use]
    pub fn from_generated(generated: &GeneratedPuzzle<E>) -> Self {
        Self::from_puzzle(generated.params.clone(), generated.puzzle.clone())
    }

    /// Returns the parameters.
    #[must_use]
    pub fn params(&self) -> &E::Params {
        &self.params
    }

    /// Returns the puzzle content.
    #[must_use]
    pub fn puzzle(&self) -> &E::Puzzle {
        &self.puzzle
    }

    /// Returns the play state.
    #[must_use]
    pub fn state(&self) -> &E::State {
        &self.state
    }

    /// Returns the status computed by the last validation pass.
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns `true` once the state has been complete.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns `true` if completion came from a solution load.
    #[must_use]
    pub fn is_cheated(&self) -> bool {
        self.cheated
    }

    /// Applies a batch of `;`-separated move tokens.
    ///
    /// Returns the new session; `self` is left unchanged whether or not the
    /// batch is accepted. Empty tokens between separators are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::Empty`] if the batch holds no token, or the first
    /// error raised while parsing or applying a token.
    pub fn apply(&self, moves: &str) -> Result<Self, MoveError> {
        let tokens: Vec<&str> = moves
            .split(';')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();
        if tokens.is_empty() {
            return Err(MoveError::Empty);
        }

        let mut state = self.state.clone();
        let mut loaded_solution = false;
        for token in tokens {
            let mv = E::parse_move(&self.params, token)?;
            loaded_solution |= E::loads_solution(&mv);
            E::apply_move(&self.params, &self.puzzle, &mut state, mv)?;
        }
        let status = E::check(&self.params, &self.puzzle, &mut state);
        log::trace!("{}: applied `{moves}`, now {status}", E::NAME);

        let complete = status.is_complete();
        Ok(Self {
            params: self.params.clone(),
            puzzle: self.puzzle.clone(),
            state,
            status,
            completed: self.completed || complete,
            cheated: self.cheated || (complete && loaded_solution),
        })
    }

    /// Returns the move string that loads the solution.
    #[must_use]
    pub fn solution_move(&self) -> Option<String> {
        E::solution_move(&self.params, &self.puzzle)
    }

    /// Returns the session with the solution loaded.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Unsolvable`] if the puzzle has no unique solution.
    pub fn solve(&self) -> Result<Self, GameError> {
        let moves = self.solution_move().ok_or(GameError::Unsolvable)?;
        Ok(self.apply(&moves)?)
    }

    /// Renders the play state as plain text.
    #[must_use]
    pub fn text(&self) -> String {
        E::text_format(&self.params, &self.puzzle, &self.state)
    }
}

impl<E: PuzzleEngine> Clone for Game<E> {
    fn clone(&self) -> Self {
        Self {
            params: self.params.clone(),
            puzzle: self.puzzle.clone(),
            state: self.state.clone(),
            status: self.status,
            completed: self.completed,
            cheated: self.cheated,
        }
    }
}

impl<E: PuzzleEngine> PartialEq for Game<E> {
    fn eq(&self, other: &Self) -> bool {
        self.params == other.params
            && self.puzzle == other.puzzle
            && self.state == other.state
            && self.status == other.status
            && self.completed == other.completed
            && self.cheated == other.cheated
    }
}

impl<E: PuzzleEngine> Eq for Game<E> {}

impl<E: PuzzleEngine> Debug for Game<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("engine", &E::NAME)
            .field("params", &self.params)
            .field("puzzle", &self.puzzle)
            .field("state", &self.state)
            .field("status", &self.status)
            .field("completed", &self.completed)
            .field("cheated", &self.cheated)
            .finish()
    }
}
