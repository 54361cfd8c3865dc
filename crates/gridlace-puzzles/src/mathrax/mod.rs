//! Mathrax: a Latin square with arithmetic clues at cell corners.
//!
//! Every row and column of an `order`×`order` grid holds `1..=order` once.
//! A clue sitting where four cells meet constrains both diagonal pairs of
//! those cells: their sum, difference, product, quotient, or parity.
//!
//! # Examples
//!
//! ```
//! use gridlace_core::{Difficulty, Position, PuzzleEngine, SolveOutcome, Status};
//! use gridlace_game::Game;
//! use gridlace_puzzles::Mathrax;
//!
//! let params = "3de".parse()?;
//! let report = Mathrax::solve(&params, &Mathrax::decode(&params, "123f,A4c")?, Difficulty::Easy);
//! assert_eq!(report.outcome, SolveOutcome::Solved(Difficulty::Easy));
//!
//! let game = Game::<Mathrax>::new(params, "123f,A4c")?.apply("R1,1,3")?;
//! assert_eq!(game.state().value(Position::new(1, 1)), 3);
//! assert_eq!(game.status(), Status::Incomplete);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use gridlace_core::{
    ClueLayer, ClueSlot, DescriptorError, Difficulty, Grid, MoveError, ParamsError, Position,
    Preset, PuzzleEngine, PuzzleRng, SolveReport, Status,
};
use gridlace_generator::random_latin_square;

pub use self::{
    params::{ClueOptions, MathraxParams},
    puzzle::{MAX_CLUE_NUMBER, MathraxClue, MathraxPuzzle},
    state::{MathraxMove, MathraxState},
};

mod params;
mod puzzle;
mod solver;
mod state;

/// The Mathrax engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Mathrax;

const GRID_LAYER: usize = 0;

impl PuzzleEngine for Mathrax {
    const NAME: &'static str = "Mathrax";

    type Params = MathraxParams;
    type Puzzle = MathraxPuzzle;
    type Solution = Grid<u8>;
    type Draft = MathraxPuzzle;
    type State = MathraxState;
    type Move = MathraxMove;

    fn difficulties() -> &'static [Difficulty] {
        &[
            Difficulty::Easy,
            Difficulty::Normal,
            Difficulty::Tricky,
            Difficulty::Recursive,
        ]
    }

    fn presets() -> Vec<Preset<MathraxParams>> {
        params::presets()
    }

    fn validate_params(params: &MathraxParams) -> Result<(), ParamsError> {
        params.validate()
    }

    fn difficulty(params: &MathraxParams) -> Difficulty {
        params.difficulty
    }

    fn encode(_params: &MathraxParams, puzzle: &MathraxPuzzle) -> String {
        puzzle::encode(puzzle)
    }

    fn decode(params: &MathraxParams, desc: &str) -> Result<MathraxPuzzle, DescriptorError> {
        puzzle::decode(params, desc)
    }

    fn solve(
        params: &MathraxParams,
        puzzle: &MathraxPuzzle,
        max: Difficulty,
    ) -> SolveReport<Grid<u8>> {
        solver::solve(params, puzzle, max)
    }

    fn seed(params: &MathraxParams, rng: &mut PuzzleRng) -> MathraxPuzzle {
        let order = params.order;
        let grid = random_latin_square(order, rng);
        let g = |x, y| grid[Position::new(x, y)];
        let mut clues = Grid::new(order - 1, order - 1, MathraxClue::None);
        for pos in clues.positions() {
            let (x, y) = (pos.x(), pos.y());
            clues[pos] = MathraxClue::fitting(
                g(x, y),
                g(x + 1, y + 1),
                g(x + 1, y),
                g(x, y + 1),
                params.options,
            );
        }
        MathraxPuzzle { grid, clues }
    }

    fn clue_layers(params: &MathraxParams) -> Vec<ClueLayer> {
        vec![
            ClueLayer {
                name: "grid",
                width: params.order,
                height: params.order,
                symmetric: true,
            },
            ClueLayer {
                name: "clues",
                width: params.order - 1,
                height: params.order - 1,
                symmetric: true,
            },
        ]
    }

    fn weaken(_params: &MathraxParams, draft: &mut MathraxPuzzle, slot: ClueSlot) -> bool {
        let pos = Position::new(slot.x, slot.y);
        if slot.layer == GRID_LAYER {
            draft
                .grid
                .get_mut(pos)
                .is_some_and(|d| std::mem::take(d) != 0)
        } else {
            draft
                .clues
                .get_mut(pos)
                .is_some_and(|clue| !std::mem::take(clue).is_none())
        }
    }

    fn is_clued(_params: &MathraxParams, draft: &MathraxPuzzle, slot: ClueSlot) -> bool {
        let pos = Position::new(slot.x, slot.y);
        if slot.layer == GRID_LAYER {
            draft.grid.get(pos).is_some_and(|&d| d != 0)
        } else {
            draft.clues.get(pos).is_some_and(|clue| !clue.is_none())
        }
    }

    fn finish(_params: &MathraxParams, draft: &MathraxPuzzle) -> MathraxPuzzle {
        draft.clone()
    }

    fn new_state(_params: &MathraxParams, puzzle: &MathraxPuzzle) -> MathraxState {
        MathraxState::new(puzzle)
    }

    fn parse_move(params: &MathraxParams, token: &str) -> Result<MathraxMove, MoveError> {
        state::parse_move(params, token)
    }

    fn apply_move(
        params: &MathraxParams,
        _puzzle: &MathraxPuzzle,
        state: &mut MathraxState,
        mv: MathraxMove,
    ) -> Result<(), MoveError> {
        state::apply_move(params, state, mv)
    }

    fn loads_solution(mv: &MathraxMove) -> bool {
        matches!(mv, MathraxMove::Solve(_))
    }

    fn check(params: &MathraxParams, puzzle: &MathraxPuzzle, state: &mut MathraxState) -> Status {
        state::check(params, puzzle, state)
    }

    fn solution_move(params: &MathraxParams, puzzle: &MathraxPuzzle) -> Option<String> {
        let report = solver::solve(params, puzzle, Difficulty::Recursive);
        report.solution.as_ref().map(state::solution_move)
    }

    fn text_format(
        _params: &MathraxParams,
        puzzle: &MathraxPuzzle,
        state: &MathraxState,
    ) -> String {
        state::text_format(puzzle, state)
    }
}

#[cfg(test)]
mod tests {
    use gridlace_core::SolveOutcome;
    use gridlace_generator::PuzzleSeed;

    use super::*;

    #[test]
    fn test_seed_is_fully_clued() {
        let params: MathraxParams = "5dnAS".parse().unwrap();
        let draft = Mathrax::seed(&params, &mut PuzzleSeed::new([5; 32]).rng());
        assert!(draft.grid.iter().all(|&d| (1..=5).contains(&d)));
        assert!(draft.clues.iter().all(|clue| {
            matches!(clue, MathraxClue::None | MathraxClue::Add(_) | MathraxClue::Sub(_))
        }));
        let report = Mathrax::solve(&params, &draft, Difficulty::Easy);
        assert_eq!(report.outcome, SolveOutcome::Solved(Difficulty::Easy));
        assert_eq!(report.solution.as_ref(), Some(&draft.grid));
    }

    #[test]
    fn test_weaken() {
        let params = MathraxParams::new(3, Difficulty::Easy);
        let mut draft = Mathrax::decode(&params, "123f,A4c").unwrap();
        let digit = ClueSlot {
            layer: GRID_LAYER,
            x: 2,
            y: 0,
        };
        assert!(Mathrax::weaken(&params, &mut draft, digit));
        assert_eq!(draft.grid[Position::new(2, 0)], 0);
        assert!(!Mathrax::weaken(&params, &mut draft, digit));

        let clue = ClueSlot { layer: 1, x: 0, y: 0 };
        assert!(Mathrax::weaken(&params, &mut draft, clue));
        assert!(draft.clues[Position::new(0, 0)].is_none());
        assert!(!Mathrax::weaken(&params, &mut draft, clue));
        assert_eq!(Mathrax::encode(&params, &draft), "12g,d");
    }

    #[test]
    fn test_solution_move() {
        let params = MathraxParams::new(3, Difficulty::Easy);
        let puzzle = Mathrax::decode(&params, "123f,A4c").unwrap();
        assert_eq!(
            Mathrax::solution_move(&params, &puzzle).as_deref(),
            Some("S123231312")
        );
    }
}
