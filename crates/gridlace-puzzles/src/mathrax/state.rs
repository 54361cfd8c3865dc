use std::fmt::Write as _;

use gridlace_core::{CandidateSet, CellFlags, Grid, MoveError, Position, Status};

use super::{MathraxClue, MathraxParams, MathraxPuzzle, puzzle::clues_around};
use crate::parse::cell_move_args;

/// Play state of a Mathrax puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MathraxState {
    values: Grid<u8>,
    marks: Grid<CandidateSet>,
    flags: Grid<CellFlags>,
}

impl MathraxState {
    fn is_given(&self, pos: Position) -> bool {
        self.flags[pos].contains(CellFlags::IMMUTABLE)
    }

    pub(super) fn new(puzzle: &MathraxPuzzle) -> Self {
        let order = puzzle.order();
        Self {
            values: puzzle.grid.clone(),
            marks: Grid::new(order, order, CandidateSet::EMPTY),
            flags: puzzle.grid.map(|&d| {
                if d == 0 {
                    CellFlags::empty()
                } else {
                    CellFlags::IMMUTABLE
                }
            }),
        }
    }

    /// Returns the digit at `pos`, `0` if empty.
    #[must_use]
    pub fn value(&self, pos: Position) -> u8 {
        self.values[pos]
    }

    /// Returns the pencil marks at `pos`.
    #[must_use]
    pub fn marks(&self, pos: Position) -> CandidateSet {
        self.marks[pos]
    }

    /// Returns the flags at `pos`.
    #[must_use]
    pub fn flags(&self, pos: Position) -> CellFlags {
        self.flags[pos]
    }
}

/// A Mathrax move.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MathraxMove {
    /// `R<x>,<y>,<d>`: writes a digit.
    Place(Position, u8),
    /// `P<x>,<y>,<d>`: toggles a pencil mark.
    Toggle(Position, u8),
    /// `R<x>,<y>,-`: empties a cell, or clears its marks if already empty.
    Clear(Position),
    /// `P<x>,<y>,-`: clears the pencil marks of a cell.
    ClearMarks(Position),
    /// `S<digits>`: loads a full solution.
    Solve(Vec<u8>),
    /// `M`: marks every value in every empty cell.
    FillCandidates,
}

fn parse_digit(params: &MathraxParams, c: char) -> Result<u8, MoveError> {
    c.to_digit(10)
        .and_then(|d| u8::try_from(d).ok())
        .filter(|&d| (1..=params.order_u8()).contains(&d))
        .ok_or(MoveError::InvalidValue { value: c })
}

pub(super) fn parse_move(params: &MathraxParams, token: &str) -> Result<MathraxMove, MoveError> {
    let mut chars = token.chars();
    let tag = chars.next().ok_or(MoveError::Empty)?;
    let body = chars.as_str();
    match tag {
        'M' if body.is_empty() => Ok(MathraxMove::FillCandidates),
        'M' => Err(MoveError::Malformed {
            token: token.to_owned(),
        }),
        'S' => {
            let digits = body
                .chars()
                .map(|c| parse_digit(params, c))
                .collect::<Result<Vec<_>, _>>()?;
            let expected = params.order * params.order;
            if digits.len() != expected {
                return Err(MoveError::SolutionLength {
                    expected,
                    actual: digits.len(),
                });
            }
            Ok(MathraxMove::Solve(digits))
        }
        'R' | 'P' => {
            let (x, y, c) = cell_move_args(token, body)?;
            if x >= params.order || y >= params.order {
                return Err(MoveError::OutOfRange { x, y });
            }
            let pos = Position::new(x, y);
            Ok(match (tag, c) {
                ('R', '-') => MathraxMove::Clear(pos),
                (_, '-') => MathraxMove::ClearMarks(pos),
                ('R', _) => MathraxMove::Place(pos, parse_digit(params, c)?),
                _ => MathraxMove::Toggle(pos, parse_digit(params, c)?),
            })
        }
        _ => Err(MoveError::UnknownTag { tag }),
    }
}

pub(super) fn apply_move(
    params: &MathraxParams,
    state: &mut MathraxState,
    mv: MathraxMove,
) -> Result<(), MoveError> {
    let locked = |pos: Position| MoveError::CellLocked {
        x: pos.x(),
        y: pos.y(),
    };
    match mv {
        MathraxMove::Place(pos, d) => {
            if state.values[pos] == d {
                return Ok(());
            }
            if state.is_given(pos) || state.values[pos] != 0 {
                return Err(locked(pos));
            }
            state.values[pos] = d;
            state.marks[pos].clear();
        }
        MathraxMove::Toggle(pos, d) => {
            if state.is_given(pos) || state.values[pos] != 0 {
                return Err(locked(pos));
            }
            state.marks[pos].toggle(d);
        }
        MathraxMove::Clear(pos) => {
            if state.is_given(pos) {
                return Err(locked(pos));
            }
            if state.values[pos] == 0 {
                state.marks[pos].clear();
            }
            state.values[pos] = 0;
        }
        MathraxMove::ClearMarks(pos) => {
            if state.is_given(pos) {
                return Err(locked(pos));
            }
            state.marks[pos].clear();
        }
        MathraxMove::Solve(digits) => {
            for (i, d) in digits.into_iter().enumerate() {
                let pos = state.values.position_of(i);
                if !state.is_given(pos) {
                    state.values[pos] = d;
                }
                state.marks[pos].clear();
            }
        }
        MathraxMove::FillCandidates => {
            let all = CandidateSet::full(params.order_u8());
            for pos in state.values.positions() {
                if state.values[pos] == 0 {
                    state.marks[pos] = all;
                }
            }
        }
    }
    Ok(())
}

pub(super) fn check(params: &MathraxParams, puzzle: &MathraxPuzzle, state: &mut MathraxState) -> Status {
    let order = params.order;
    let any = CandidateSet::full(params.order_u8());
    let as_set = |d: u8| if d == 0 { any } else { CandidateSet::from_value(d) };

    let mut rows = vec![[0_u8; 10]; order];
    let mut cols = vec![[0_u8; 10]; order];
    for pos in state.values.positions() {
        let d = usize::from(state.values[pos]);
        if d != 0 {
            rows[pos.y()][d] += 1;
            cols[pos.x()][d] += 1;
        }
    }

    let mut status = Status::Complete;
    for pos in state.values.positions() {
        let d = state.values[pos];
        let mut errors = CellFlags::empty();
        if d == 0 {
            status = status.min(Status::Incomplete);
        } else if rows[pos.y()][usize::from(d)] > 1 || cols[pos.x()][usize::from(d)] > 1 {
            errors |= CellFlags::ERROR;
        }
        for (clue, partner, corner) in clues_around(&puzzle.clues, pos) {
            let options = clue.options(as_set(state.values[partner]), false);
            if (options & as_set(d)).is_empty() {
                errors |= corner.error_flag();
            }
        }
        let flags = &mut state.flags[pos];
        flags.remove(CellFlags::ERRORS);
        flags.insert(errors);
        if errors.has_error() {
            status = Status::Invalid;
        }
    }
    status
}

pub(super) fn solution_move(solution: &Grid<u8>) -> String {
    let mut out = String::from("S");
    out.extend(solution.iter().map(|&d| char::from(b'0' + d)));
    out
}

fn clue_label(clue: MathraxClue) -> String {
    match clue {
        MathraxClue::None => String::new(),
        MathraxClue::Add(n) => format!("+{n}"),
        MathraxClue::Sub(0) => "=".to_owned(),
        MathraxClue::Sub(n) => format!("-{n}"),
        MathraxClue::Mul(n) => format!("*{n}"),
        MathraxClue::Div(n) => format!("/{n}"),
        MathraxClue::Even => "E".to_owned(),
        MathraxClue::Odd => "O".to_owned(),
    }
}

/// Renders digits four columns apart with the intersection clues on the
/// lines in between.
pub(super) fn text_format(puzzle: &MathraxPuzzle, state: &MathraxState) -> String {
    let order = puzzle.order();
    let mut out = String::new();
    for y in 0..order {
        let row: Vec<String> = (0..order)
            .map(|x| match state.values[Position::new(x, y)] {
                0 => ".".to_owned(),
                d => d.to_string(),
            })
            .collect();
        out.push_str(&row.join("   "));
        out.push('\n');
        if y + 1 < order {
            let mut line = String::from(" ");
            for x in 0..order - 1 {
                let label = clue_label(puzzle.clues[Position::new(x, y)]);
                let _ = write!(line, "{label:^3} ");
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use gridlace_core::Difficulty;

    use super::*;
    use crate::mathrax::puzzle::decode;

    fn setup(desc: &str) -> (MathraxParams, MathraxPuzzle, MathraxState) {
        let params = MathraxParams::new(3, Difficulty::Easy);
        let puzzle = decode(&params, desc).unwrap();
        let state = MathraxState::new(&puzzle);
        (params, puzzle, state)
    }

    fn play(
        params: &MathraxParams,
        puzzle: &MathraxPuzzle,
        state: &mut MathraxState,
        token: &str,
    ) -> Result<Status, MoveError> {
        let mv = parse_move(params, token)?;
        apply_move(params, state, mv)?;
        Ok(check(params, puzzle, state))
    }

    #[test]
    fn test_parse_move() {
        let params = MathraxParams::new(4, Difficulty::Easy);
        assert_eq!(
            parse_move(&params, "R1,2,4"),
            Ok(MathraxMove::Place(Position::new(1, 2), 4))
        );
        assert_eq!(
            parse_move(&params, "P0,0,-"),
            Ok(MathraxMove::ClearMarks(Position::new(0, 0)))
        );
        assert_eq!(
            parse_move(&params, "R0,0,5"),
            Err(MoveError::InvalidValue { value: '5' })
        );
        assert_eq!(
            parse_move(&params, "R0,0,0"),
            Err(MoveError::InvalidValue { value: '0' })
        );
        assert_eq!(
            parse_move(&params, "P4,0,1"),
            Err(MoveError::OutOfRange { x: 4, y: 0 })
        );
        assert_eq!(
            parse_move(&params, "S1234"),
            Err(MoveError::SolutionLength {
                expected: 16,
                actual: 4
            })
        );
        assert_eq!(
            parse_move(&params, "Mx"),
            Err(MoveError::Malformed {
                token: "Mx".to_owned()
            })
        );
        assert_eq!(parse_move(&params, ""), Err(MoveError::Empty));
    }

    #[test]
    fn test_givens_are_immutable() {
        let (params, puzzle, mut state) = setup("123f,A4c");
        assert_eq!(
            play(&params, &puzzle, &mut state, "R0,0,2"),
            Err(MoveError::CellLocked { x: 0, y: 0 })
        );
        assert_eq!(
            play(&params, &puzzle, &mut state, "P0,0,2"),
            Err(MoveError::CellLocked { x: 0, y: 0 })
        );
        // Re-placing the given digit changes nothing.
        assert_eq!(play(&params, &puzzle, &mut state, "R0,0,1"), Ok(Status::Incomplete));
    }

    #[test]
    fn test_place_and_clear() {
        let (params, puzzle, mut state) = setup("123f,A4c");
        let pos = Position::new(1, 1);
        play(&params, &puzzle, &mut state, "P1,1,1").unwrap();
        play(&params, &puzzle, &mut state, "P1,1,3").unwrap();
        assert_eq!(state.marks(pos).iter().collect::<Vec<_>>(), [1, 3]);

        assert_eq!(play(&params, &puzzle, &mut state, "R1,1,3"), Ok(Status::Incomplete));
        assert!(state.marks(pos).is_empty());
        assert_eq!(
            play(&params, &puzzle, &mut state, "R1,1,1"),
            Err(MoveError::CellLocked { x: 1, y: 1 })
        );
        assert_eq!(
            play(&params, &puzzle, &mut state, "P1,1,2"),
            Err(MoveError::CellLocked { x: 1, y: 1 })
        );
        play(&params, &puzzle, &mut state, "R1,1,-").unwrap();
        assert_eq!(state.value(pos), 0);
    }

    #[test]
    fn test_clue_errors_point_at_partner() {
        let (params, puzzle, mut state) = setup("123f,A4c");
        let status = play(&params, &puzzle, &mut state, "R1,1,2").unwrap();
        assert_eq!(status, Status::Invalid);
        // 2 repeats the 2 above it, and 1 + 2 misses the sum of 4.
        let flags = state.flags(Position::new(1, 1));
        assert!(flags.contains(CellFlags::ERROR | CellFlags::ERROR_TOP_LEFT));
        assert!(
            state
                .flags(Position::new(0, 0))
                .contains(CellFlags::ERROR_BOTTOM_RIGHT)
        );
        play(&params, &puzzle, &mut state, "R1,1,-").unwrap();
        assert!(!state.flags(Position::new(1, 1)).has_error());
        assert!(!state.flags(Position::new(0, 0)).has_error());
    }

    #[test]
    fn test_solution_load_keeps_givens() {
        let (params, puzzle, mut state) = setup("123f,A4c");
        assert_eq!(
            play(&params, &puzzle, &mut state, "S123231312"),
            Ok(Status::Complete)
        );
        assert_eq!(
            play(&params, &puzzle, &mut state, "S321312231"),
            Ok(Status::Invalid)
        );
        assert_eq!(state.value(Position::new(0, 0)), 1);
    }

    #[test]
    fn test_fill_candidates() {
        let (params, puzzle, mut state) = setup("123f,A4c");
        play(&params, &puzzle, &mut state, "M").unwrap();
        assert!(state.marks(Position::new(0, 0)).is_empty());
        assert_eq!(state.marks(Position::new(2, 2)), CandidateSet::full(3));
    }

    #[test]
    fn test_text_format() {
        let (_, puzzle, state) = setup("123f,A4bS0");
        assert_eq!(
            text_format(&puzzle, &state),
            "1   2   3\n +4\n.   .   .\n      =\n.   .   .\n"
        );
    }
}
