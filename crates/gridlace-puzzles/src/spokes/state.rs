use std::fmt::Write as _;

use gridlace_core::{CellFlags, Grid, MoveError, Position, Status};

use super::{Direction, Hub, Spoke, SpokesBoard, SpokesParams, SpokesPuzzle};
use crate::parse::cell_move_args;

/// Play state of a Spokes puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpokesState {
    board: SpokesBoard,
    flags: Grid<CellFlags>,
}

impl SpokesState {
    pub(super) fn new(puzzle: &SpokesPuzzle) -> Self {
        let hubs = &puzzle.hubs;
        Self {
            board: SpokesBoard::new(puzzle),
            flags: Grid::new(hubs.width(), hubs.height(), CellFlags::empty()),
        }
    }

    /// Returns the hubs and their spokes.
    #[must_use]
    pub fn board(&self) -> &SpokesBoard {
        &self.board
    }

    /// Returns the flags of the hub at `pos`.
    #[must_use]
    pub fn flags(&self, pos: Position) -> CellFlags {
        self.flags[pos]
    }
}

/// A Spokes move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpokesMove {
    /// `<hub>,<dir>,<state>`: sets a spoke, where `hub` is the row-major
    /// index of the hub.
    Set {
        /// The hub position.
        pos: Position,
        /// The spoke direction.
        dir: Direction,
        /// The new spoke state.
        spoke: Spoke,
    },
    /// `S`: resets every line and mark ahead of a solution load.
    Solve,
}

pub(super) fn parse_move(params: &SpokesParams, token: &str) -> Result<SpokesMove, MoveError> {
    if token == "S" {
        return Ok(SpokesMove::Solve);
    }
    let (hub, dir, c) = cell_move_args(token, token)?;
    let len = params.width * params.height;
    let dir_value = Direction::from_index(dir);
    let Some(dir) = dir_value.filter(|_| hub < len) else {
        return Err(MoveError::OutOfRange { x: hub, y: dir });
    };
    let spoke = match c {
        '1' => Spoke::Empty,
        '2' => Spoke::Line,
        '3' => Spoke::Marked,
        _ => return Err(MoveError::InvalidValue { value: c }),
    };
    let pos = Position::new(hub % params.width, hub / params.width);
    Ok(SpokesMove::Set { pos, dir, spoke })
}

pub(super) fn apply_move(state: &mut SpokesState, mv: SpokesMove) {
    match mv {
        SpokesMove::Set { pos, dir, spoke } => {
            // Spokes that can never hold a line are silently left alone.
            if !state.board.spoke(pos, dir).is_hidden() {
                state.board.place(pos, dir, spoke);
            }
        }
        SpokesMove::Solve => state.board.clear(),
    }
}

pub(super) fn check(state: &mut SpokesState) -> Status {
    let board = &state.board;
    let mut errors = Grid::new(board.width(), board.height(), false);
    for pos in board.hubs().positions() {
        if board.overloaded(pos) {
            errors[pos] = true;
        }
        if board.lines_cross(pos) {
            for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
                if let Some(corner) = pos.offset(dx, dy, board.width(), board.height()) {
                    errors[corner] = true;
                }
            }
        }
    }
    for (flags, &error) in state.flags.iter_mut().zip(errors.iter()) {
        flags.remove(CellFlags::ERRORS);
        flags.set(CellFlags::ERROR, error);
    }
    board.status()
}

pub(super) fn solution_move(solution: &Grid<Hub>) -> String {
    let mut out = String::from("S;");
    for (i, hub) in solution.iter().enumerate() {
        for dir in Direction::FORWARD {
            let spoke = hub.spoke(dir);
            if spoke.is_line() || spoke.is_marked() {
                let _ = write!(out, "{i},{},{};", dir.index(), spoke as u8);
            }
        }
    }
    out
}

/// Draws hubs with `-`, `|`, `\` and `/` for the lines between them.
pub(super) fn text_format(state: &SpokesState) -> String {
    let board = &state.board;
    let (w, h) = (board.width(), board.height());
    let line = |pos, dir| board.spoke(pos, dir).is_line();
    let mut out = String::new();
    for y in 0..h {
        for x in 0..w {
            let pos = Position::new(x, y);
            out.push(match board.number(pos) {
                0 => ' ',
                n => char::from(b'0' + n),
            });
            out.push(if x + 1 == w {
                '\n'
            } else if line(pos, Direction::Right) {
                '-'
            } else {
                ' '
            });
        }
        if y + 1 == h {
            break;
        }
        for x in 0..w {
            let pos = Position::new(x, y);
            out.push(if line(pos, Direction::Bottom) { '|' } else { ' ' });
            out.push(if x + 1 == w {
                '\n'
            } else if line(pos, Direction::BottomRight) {
                '\\'
            } else if line(Position::new(x + 1, y), Direction::BottomLeft) {
                '/'
            } else {
                ' '
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use gridlace_core::Difficulty;

    use super::*;
    use crate::spokes::puzzle::decode;

    fn setup(width: usize, height: usize, desc: &str) -> (SpokesParams, SpokesState) {
        let params = SpokesParams::new(width, height, Difficulty::Easy);
        let puzzle = decode(&params, desc).unwrap();
        (params, SpokesState::new(&puzzle))
    }

    fn play(params: &SpokesParams, state: &mut SpokesState, token: &str) -> Result<Status, MoveError> {
        let mv = parse_move(params, token)?;
        apply_move(state, mv);
        Ok(check(state))
    }

    #[test]
    fn test_parse_move() {
        let params = SpokesParams::new(3, 2, Difficulty::Easy);
        assert_eq!(
            parse_move(&params, "4,2,3"),
            Ok(SpokesMove::Set {
                pos: Position::new(1, 1),
                dir: Direction::Bottom,
                spoke: Spoke::Marked
            })
        );
        assert_eq!(parse_move(&params, "S"), Ok(SpokesMove::Solve));
        assert_eq!(
            parse_move(&params, "6,0,2"),
            Err(MoveError::OutOfRange { x: 6, y: 0 })
        );
        assert_eq!(
            parse_move(&params, "0,8,2"),
            Err(MoveError::OutOfRange { x: 0, y: 8 })
        );
        assert_eq!(
            parse_move(&params, "0,0,0"),
            Err(MoveError::InvalidValue { value: '0' })
        );
        assert_eq!(
            parse_move(&params, "0,0,4"),
            Err(MoveError::InvalidValue { value: '4' })
        );
        assert!(matches!(
            parse_move(&params, "Sx"),
            Err(MoveError::Malformed { .. })
        ));
    }

    #[test]
    fn test_lines_and_errors() {
        let (params, mut state) = setup(3, 1, "121");
        assert_eq!(play(&params, &mut state, "0,0,2"), Ok(Status::Incomplete));
        // The line shows up from the other end too.
        assert!(
            state
                .board()
                .spoke(Position::new(1, 0), Direction::Left)
                .is_line()
        );
        assert_eq!(play(&params, &mut state, "1,0,3"), Ok(Status::Invalid));
        assert!(state.flags(Position::new(1, 0)).has_error());
        assert!(state.flags(Position::new(2, 0)).has_error());
        assert!(!state.flags(Position::new(0, 0)).has_error());
        assert_eq!(play(&params, &mut state, "2,4,2"), Ok(Status::Complete));
        assert!(!state.flags(Position::new(1, 0)).has_error());
    }

    #[test]
    fn test_crossing_flags_all_corners() {
        let (params, mut state) = setup(2, 2, "2222");
        assert_eq!(play(&params, &mut state, "0,1,2"), Ok(Status::Incomplete));
        assert_eq!(play(&params, &mut state, "1,3,2"), Ok(Status::Invalid));
        for pos in state.board().hubs().positions() {
            assert!(state.flags(pos).contains(CellFlags::ERROR));
        }
    }

    #[test]
    fn test_hidden_spoke_is_left_alone() {
        let (params, mut state) = setup(2, 2, "1111");
        let before = state.clone();
        play(&params, &mut state, "0,4,2").unwrap();
        assert_eq!(state.board(), before.board());
    }

    #[test]
    fn test_solve_resets_first() {
        let (params, mut state) = setup(3, 1, "121");
        play(&params, &mut state, "0,0,3").unwrap();
        play(&params, &mut state, "S").unwrap();
        assert!(
            state
                .board()
                .spoke(Position::new(0, 0), Direction::Right)
                .is_empty()
        );
    }

    #[test]
    fn test_solution_move() {
        let (_, mut state) = setup(3, 1, "121");
        state.board.place(Position::new(0, 0), Direction::Right, Spoke::Line);
        state.board.place(Position::new(1, 0), Direction::Right, Spoke::Line);
        assert_eq!(solution_move(state.board.hubs()), "S;0,0,2;1,0,2;");
    }

    #[test]
    fn test_text_format() {
        let (params, mut state) = setup(3, 2, "231X11");
        for token in ["0,0,2", "1,0,2", "1,2,2", "2,3,2", "4,0,2"] {
            play(&params, &mut state, token).unwrap();
        }
        assert_eq!(text_format(&state), "2-3-1\n  |/ \n  1-1\n");
    }
}
