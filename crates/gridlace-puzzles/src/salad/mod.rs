//! Salad: a Latin square with holes.
//!
//! An `order`×`order` grid holds `symbols` distinct symbols in every row and
//! column; the remaining cells are holes. Two clue styles exist:
//!
//! - **ABC End View** ([`SaladMode::Letters`]): letters around the border
//!   name the first letter seen from that edge.
//! - **Number Ball** ([`SaladMode::Numbers`]): circles in the grid mark cells
//!   that hold a number, crosses mark holes.
//!
//! # Examples
//!
//! ```
//! use gridlace_core::{Position, PuzzleEngine, Status};
//! use gridlace_game::Game;
//! use gridlace_puzzles::Salad;
//!
//! let game = Game::<Salad>::new("5n3Lde".parse()?, "BaAbiCe,")?;
//! let game = game.apply("R0,0,B")?;
//!
//! assert_eq!(game.state().value(Position::new(0, 0)), 2);
//! assert!(game.state().marks(Position::new(0, 0)).is_empty());
//! assert_eq!(game.status(), Status::Incomplete);
//! assert!(game.apply("R0,0,A").is_err());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use gridlace_core::{
    ClueLayer, ClueSlot, DescriptorError, Difficulty, Grid, MoveError, ParamsError, Position,
    Preset, PuzzleEngine, PuzzleRng, SolveReport, Status,
};
use gridlace_generator::random_latin_square;

pub use self::{
    params::{SaladMode, SaladParams},
    puzzle::{SaladClue, SaladPuzzle},
    solver::Hole,
    state::{SaladMark, SaladMove, SaladState},
};

mod params;
mod puzzle;
mod solver;
mod state;

/// The Salad engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Salad;

const GRID_LAYER: usize = 0;

impl PuzzleEngine for Salad {
    const NAME: &'static str = "Salad";

    type Params = SaladParams;
    type Puzzle = SaladPuzzle;
    type Solution = Grid<u8>;
    type Draft = SaladPuzzle;
    type State = SaladState;
    type Move = SaladMove;

    fn difficulties() -> &'static [Difficulty] {
        &[Difficulty::Easy, Difficulty::Hard]
    }

    fn presets() -> Vec<Preset<SaladParams>> {
        params::presets()
    }

    fn validate_params(params: &SaladParams) -> Result<(), ParamsError> {
        params.validate()
    }

    fn difficulty(params: &SaladParams) -> Difficulty {
        params.difficulty
    }

    fn encode(params: &SaladParams, puzzle: &SaladPuzzle) -> String {
        puzzle::encode(params, puzzle)
    }

    fn decode(params: &SaladParams, desc: &str) -> Result<SaladPuzzle, DescriptorError> {
        puzzle::decode(params, desc)
    }

    fn solve(params: &SaladParams, puzzle: &SaladPuzzle, max: Difficulty) -> SolveReport<Grid<u8>> {
        solver::solve(params, puzzle, max)
    }

    fn seed(params: &SaladParams, rng: &mut PuzzleRng) -> SaladPuzzle {
        let order = params.order;
        let symbols = params.symbol_count();
        let square = random_latin_square(order, rng);
        let mut draft = SaladPuzzle::empty(order);
        draft.grid = square.map(|&v| {
            if v <= symbols {
                SaladClue::Symbol(v)
            } else {
                SaladClue::Cross
            }
        });

        if params.mode.is_letters() {
            for (index, clue) in draft.border.iter_mut().enumerate() {
                *clue = puzzle::border_cells(order, index)
                    .map(|pos| square[pos])
                    .find(|&v| v <= symbols)
                    .unwrap_or(0);
            }
            // Small letter grids are clued by the border alone.
            if order < 8 {
                draft.grid = Grid::new(order, order, SaladClue::Empty);
            }
        }
        draft
    }

    fn clue_layers(params: &SaladParams) -> Vec<ClueLayer> {
        let grid = ClueLayer {
            name: "grid",
            width: params.order,
            height: params.order,
            symmetric: true,
        };
        match params.mode {
            SaladMode::Numbers => vec![grid],
            SaladMode::Letters => vec![
                grid,
                ClueLayer {
                    name: "border",
                    width: params.order,
                    height: 4,
                    symmetric: false,
                },
            ],
        }
    }

    fn weaken(params: &SaladParams, draft: &mut SaladPuzzle, slot: ClueSlot) -> bool {
        if slot.layer != GRID_LAYER {
            let index = slot.y * params.order + slot.x;
            return draft
                .border
                .get_mut(index)
                .is_some_and(|clue| std::mem::take(clue) != 0);
        }
        let Some(clue) = draft.grid.get_mut(Position::new(slot.x, slot.y)) else {
            return false;
        };
        *clue = match (*clue, params.mode) {
            (SaladClue::Empty, _) => return false,
            (SaladClue::Symbol(_), SaladMode::Numbers) => SaladClue::Circle,
            _ => SaladClue::Empty,
        };
        true
    }

    fn is_clued(params: &SaladParams, draft: &SaladPuzzle, slot: ClueSlot) -> bool {
        if slot.layer == GRID_LAYER {
            draft
                .grid
                .get(Position::new(slot.x, slot.y))
                .is_some_and(|&clue| clue != SaladClue::Empty)
        } else {
            draft
                .border
                .get(slot.y * params.order + slot.x)
                .is_some_and(|&clue| clue != 0)
        }
    }

    fn finish(_params: &SaladParams, draft: &SaladPuzzle) -> SaladPuzzle {
        draft.clone()
    }

    fn accept(params: &SaladParams, puzzle: &SaladPuzzle) -> bool {
        params.mode.is_letters() || !solver::holes_deducible(params, puzzle)
    }

    fn new_state(_params: &SaladParams, puzzle: &SaladPuzzle) -> SaladState {
        SaladState::new(puzzle)
    }

    fn parse_move(params: &SaladParams, token: &str) -> Result<SaladMove, MoveError> {
        state::parse_move(params, token)
    }

    fn apply_move(
        params: &SaladParams,
        puzzle: &SaladPuzzle,
        state: &mut SaladState,
        mv: SaladMove,
    ) -> Result<(), MoveError> {
        state::apply_move(params, puzzle, state, mv)
    }

    fn loads_solution(mv: &SaladMove) -> bool {
        matches!(mv, SaladMove::Solve(_))
    }

    fn check(params: &SaladParams, puzzle: &SaladPuzzle, state: &mut SaladState) -> Status {
        state::check(params, puzzle, state)
    }

    fn solution_move(params: &SaladParams, puzzle: &SaladPuzzle) -> Option<String> {
        let report = solver::solve(params, puzzle, Difficulty::Recursive);
        report.solution.as_ref().map(state::solution_move)
    }

    fn text_format(params: &SaladParams, puzzle: &SaladPuzzle, state: &SaladState) -> String {
        state::text_format(params, puzzle, state)
    }
}
