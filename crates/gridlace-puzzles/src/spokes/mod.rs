//! Spokes: connect every hub into one network.
//!
//! Each grid point is a hub with a number. Lines run between neighbouring
//! hubs, orthogonally or diagonally, and every hub must end up with exactly
//! its number of lines. Diagonal lines may not cross, and all hubs must be
//! connected.
//!
//! # Examples
//!
//! ```
//! use gridlace_core::Status;
//! use gridlace_game::Game;
//! use gridlace_puzzles::Spokes;
//!
//! let game = Game::<Spokes>::new("2x2de".parse()?, "2222")?;
//! let game = game.apply("0,0,2;0,2,2;1,2,2;2,0,2")?;
//! assert_eq!(game.status(), Status::Complete);
//! assert!(!game.is_cheated());
//!
//! assert_eq!(game.text(), "2-2\n| |\n2-2\n");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use gridlace_core::{
    ClueLayer, ClueSlot, DescriptorError, Difficulty, Grid, MoveError, ParamsError, Position,
    Preset, PuzzleEngine, PuzzleRng, SolveReport, Status,
};
use rand::seq::IndexedRandom as _;

pub use self::{
    board::SpokesBoard,
    hub::{Direction, Hub, Spoke},
    params::SpokesParams,
    puzzle::{HubClue, SpokesPuzzle},
    state::{SpokesMove, SpokesState},
};

mod board;
mod hub;
mod params;
mod puzzle;
mod solver;
mod state;

/// The Spokes engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Spokes;

/// Maps a slot of the line layer to the line it stands for.
///
/// The layer doubles the hub coordinates: hubs sit on even/even slots and
/// every line sits halfway between its two hubs.
fn line_at(spokes: &Grid<Hub>, slot: ClueSlot) -> Option<(Position, Direction)> {
    let pos = Position::new(slot.x / 2, slot.y / 2);
    match (slot.x % 2, slot.y % 2) {
        (1, 0) => Some((pos, Direction::Right)),
        (0, 1) => Some((pos, Direction::Bottom)),
        (1, 1) if spokes.get(pos)?.spoke(Direction::BottomRight).is_line() => {
            Some((pos, Direction::BottomRight))
        }
        (1, 1) => Some((Position::new(pos.x() + 1, pos.y()), Direction::BottomLeft)),
        _ => None,
    }
}

impl PuzzleEngine for Spokes {
    const NAME: &'static str = "Spokes";

    type Params = SpokesParams;
    type Puzzle = SpokesPuzzle;
    type Solution = Grid<Hub>;
    type Draft = Grid<Hub>;
    type State = SpokesState;
    type Move = SpokesMove;

    fn difficulties() -> &'static [Difficulty] {
        &[Difficulty::Easy, Difficulty::Tricky, Difficulty::Hard]
    }

    fn presets() -> Vec<Preset<SpokesParams>> {
        params::presets()
    }

    fn validate_params(params: &SpokesParams) -> Result<(), ParamsError> {
        params.validate()
    }

    fn difficulty(params: &SpokesParams) -> Difficulty {
        params.difficulty
    }

    fn encode(_params: &SpokesParams, puzzle: &SpokesPuzzle) -> String {
        puzzle::encode(puzzle)
    }

    fn decode(params: &SpokesParams, desc: &str) -> Result<SpokesPuzzle, DescriptorError> {
        puzzle::decode(params, desc)
    }

    fn solve(params: &SpokesParams, puzzle: &SpokesPuzzle, max: Difficulty) -> SolveReport<Grid<Hub>> {
        solver::solve(params, puzzle, max)
    }

    /// Draws every orthogonal line and one random diagonal per square.
    fn seed(params: &SpokesParams, rng: &mut PuzzleRng) -> Grid<Hub> {
        let (w, h) = (params.width, params.height);
        let mut spokes = board::open_spokes(w, h);
        for pos in spokes.positions() {
            if pos.x() + 1 < w {
                board::set_spoke(&mut spokes, pos, Direction::Right, Spoke::Line);
            }
            if pos.y() + 1 < h {
                board::set_spoke(&mut spokes, pos, Direction::Bottom, Spoke::Line);
            }
            if pos.x() + 1 < w && pos.y() + 1 < h {
                let right = Position::new(pos.x() + 1, pos.y());
                let diagonals = [(pos, Direction::BottomRight), (right, Direction::BottomLeft)];
                if let Some(&(from, dir)) = diagonals.choose(rng) {
                    board::set_spoke(&mut spokes, from, dir, Spoke::Line);
                }
            }
        }
        spokes
    }

    fn clue_layers(params: &SpokesParams) -> Vec<ClueLayer> {
        vec![ClueLayer {
            name: "lines",
            width: params.width * 2 - 1,
            height: params.height * 2 - 1,
            symmetric: false,
        }]
    }

    /// Removes a line unless one of its hubs would be left without any.
    fn weaken(_params: &SpokesParams, draft: &mut Grid<Hub>, slot: ClueSlot) -> bool {
        let Some((pos, dir)) = line_at(draft, slot) else {
            return false;
        };
        let Some(hub) = draft.get(pos) else {
            return false;
        };
        let (dx, dy) = dir.delta();
        let Some(other) = pos.offset(dx, dy, draft.width(), draft.height()) else {
            return false;
        };
        if !hub.spoke(dir).is_line()
            || hub.count(Spoke::Line) < 2
            || draft[other].count(Spoke::Line) < 2
        {
            return false;
        }
        board::set_spoke(draft, pos, dir, Spoke::Empty);
        true
    }

    fn is_clued(_params: &SpokesParams, draft: &Grid<Hub>, slot: ClueSlot) -> bool {
        line_at(draft, slot)
            .is_some_and(|(pos, dir)| draft.get(pos).is_some_and(|hub| hub.spoke(dir).is_line()))
    }

    fn finish(_params: &SpokesParams, draft: &Grid<Hub>) -> SpokesPuzzle {
        SpokesPuzzle {
            hubs: draft.map(|hub| HubClue::Number(hub.count(Spoke::Line))),
        }
    }

    fn new_state(_params: &SpokesParams, puzzle: &SpokesPuzzle) -> SpokesState {
        SpokesState::new(puzzle)
    }

    fn parse_move(params: &SpokesParams, token: &str) -> Result<SpokesMove, MoveError> {
        state::parse_move(params, token)
    }

    fn apply_move(
        _params: &SpokesParams,
        _puzzle: &SpokesPuzzle,
        state: &mut SpokesState,
        mv: SpokesMove,
    ) -> Result<(), MoveError> {
        state::apply_move(state, mv);
        Ok(())
    }

    fn loads_solution(mv: &SpokesMove) -> bool {
        matches!(mv, SpokesMove::Solve)
    }

    fn check(_params: &SpokesParams, _puzzle: &SpokesPuzzle, state: &mut SpokesState) -> Status {
        state::check(state)
    }

    fn solution_move(params: &SpokesParams, puzzle: &SpokesPuzzle) -> Option<String> {
        let report = solver::solve(params, puzzle, Difficulty::Hard);
        report.solution.as_ref().map(state::solution_move)
    }

    fn text_format(_params: &SpokesParams, _puzzle: &SpokesPuzzle, state: &SpokesState) -> String {
        state::text_format(state)
    }
}

#[cfg(test)]
mod tests {
    use gridlace_core::SolveOutcome;
    use gridlace_game::Game;
    use gridlace_generator::PuzzleSeed;

    use super::*;

    fn slot(x: usize, y: usize) -> ClueSlot {
        ClueSlot { layer: 0, x, y }
    }

    #[test]
    fn test_seed_is_easy() {
        let params = SpokesParams::new(4, 3, Difficulty::Hard);
        let draft = Spokes::seed(&params, &mut PuzzleSeed::new([1; 32]).rng());
        let lines: usize = draft.iter().map(|hub| usize::from(hub.count(Spoke::Line))).sum();
        // 9 + 8 orthogonal lines and 6 diagonals, each counted from both ends.
        assert_eq!(lines, 2 * (9 + 8 + 6));
        let puzzle = Spokes::finish(&params, &draft);
        let report = Spokes::solve(&params, &puzzle, Difficulty::Easy);
        assert_eq!(report.outcome, SolveOutcome::Solved(Difficulty::Easy));
    }

    #[test]
    fn test_line_slots() {
        let draft = Spokes::seed(&SpokesParams::default(), &mut PuzzleSeed::new([2; 32]).rng());
        assert_eq!(line_at(&draft, slot(0, 0)), None);
        assert_eq!(line_at(&draft, slot(2, 2)), None);
        assert_eq!(
            line_at(&draft, slot(3, 2)),
            Some((Position::new(1, 1), Direction::Right))
        );
        assert_eq!(
            line_at(&draft, slot(2, 3)),
            Some((Position::new(1, 1), Direction::Bottom))
        );
        let (pos, dir) = line_at(&draft, slot(1, 1)).unwrap();
        assert!(draft[pos].spoke(dir).is_line());
    }

    #[test]
    fn test_weaken_keeps_a_line_on_every_hub() {
        // 1 - 2 - 1: both ends have a single line.
        let row = SpokesParams::new(3, 1, Difficulty::Easy);
        let mut draft = board::open_spokes(3, 1);
        board::set_spoke(&mut draft, Position::new(0, 0), Direction::Right, Spoke::Line);
        board::set_spoke(&mut draft, Position::new(1, 0), Direction::Right, Spoke::Line);
        assert!(!Spokes::weaken(&row, &mut draft, slot(1, 0)));
        assert!(!Spokes::weaken(&row, &mut draft, slot(3, 0)));

        // A square with its four edges and one diagonal.
        let square = SpokesParams::new(2, 2, Difficulty::Easy);
        let mut draft = board::open_spokes(2, 2);
        for (x, y, dir) in [
            (0, 0, Direction::Right),
            (0, 0, Direction::Bottom),
            (0, 0, Direction::BottomRight),
            (1, 0, Direction::Bottom),
            (0, 1, Direction::Right),
        ] {
            board::set_spoke(&mut draft, Position::new(x, y), dir, Spoke::Line);
        }
        assert!(Spokes::weaken(&square, &mut draft, slot(1, 1)));
        assert!(draft[Position::new(1, 1)].spoke(Direction::TopLeft).is_empty());
        assert!(!Spokes::weaken(&square, &mut draft, slot(1, 1)));
        assert!(Spokes::weaken(&square, &mut draft, slot(1, 0)));
        // (0, 0) is down to its bottom edge and keeps it.
        assert!(!Spokes::weaken(&square, &mut draft, slot(0, 1)));
        assert!(draft[Position::new(0, 0)].spoke(Direction::Bottom).is_line());
    }

    #[test]
    fn test_clued_slots_follow_lines() {
        let params = SpokesParams::new(2, 2, Difficulty::Easy);
        let mut draft = board::open_spokes(2, 2);
        board::set_spoke(&mut draft, Position::new(0, 0), Direction::Right, Spoke::Line);
        board::set_spoke(&mut draft, Position::new(1, 0), Direction::BottomLeft, Spoke::Line);
        assert!(Spokes::is_clued(&params, &draft, slot(1, 0)));
        assert!(Spokes::is_clued(&params, &draft, slot(1, 1)));
        assert!(!Spokes::is_clued(&params, &draft, slot(0, 1)));
        assert!(!Spokes::is_clued(&params, &draft, slot(0, 0)));

        // Random seed diagonals have no mirror image, so lines strip one by one.
        assert!(Spokes::clue_layers(&params).iter().all(|layer| !layer.symmetric));
    }

    #[test]
    fn test_solution_move_completes_game() {
        let params = SpokesParams::new(2, 2, Difficulty::Tricky);
        let game = Game::<Spokes>::new(params, "2222").unwrap();
        let solved = game.solve().unwrap();
        assert!(solved.is_completed());
        assert!(solved.is_cheated());
        assert_eq!(solved.text(), "2-2\n| |\n2-2\n");
    }
}
