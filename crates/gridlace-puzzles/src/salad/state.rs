use gridlace_core::{CandidateSet, CellFlags, Grid, MoveError, Position, Status};

use super::{Hole, SaladClue, SaladMode, SaladParams, SaladPuzzle, puzzle::border_cells};
use crate::parse::cell_move_args;

/// Play state of a Salad puzzle.
///
/// Pencil marks use bits `1..=symbols` for the symbols and bit `symbols + 1`
/// for the hole mark.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SaladState {
    values: Grid<u8>,
    holes: Grid<Hole>,
    marks: Grid<CandidateSet>,
    flags: Grid<CellFlags>,
    border_errors: Vec<bool>,
}

impl SaladState {
    pub(super) fn new(puzzle: &SaladPuzzle) -> Self {
        let values = puzzle.grid.map(|clue| match *clue {
            SaladClue::Symbol(v) => v,
            _ => 0,
        });
        let holes = puzzle.grid.map(|clue| match clue {
            SaladClue::Empty => Hole::Unknown,
            SaladClue::Symbol(_) | SaladClue::Circle => Hole::Circle,
            SaladClue::Cross => Hole::Cross,
        });
        let flags = puzzle.grid.map(|clue| {
            if is_locked(*clue) {
                CellFlags::IMMUTABLE
            } else {
                CellFlags::empty()
            }
        });
        let (width, height) = (puzzle.grid.width(), puzzle.grid.height());
        Self {
            values,
            holes,
            marks: Grid::new(width, height, CandidateSet::EMPTY),
            flags,
            border_errors: vec![false; puzzle.border.len()],
        }
    }

    /// Returns the symbol at `pos`, `0` if none.
    #[must_use]
    pub fn value(&self, pos: Position) -> u8 {
        self.values[pos]
    }

    /// Returns whether `pos` is marked as a hole or as holding a symbol.
    #[must_use]
    pub fn hole(&self, pos: Position) -> Hole {
        self.holes[pos]
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

    /// Returns `true` if border clue `index` is contradicted.
    #[must_use]
    pub fn border_error(&self, index: usize) -> bool {
        self.border_errors.get(index).copied().unwrap_or(false)
    }

    fn set_cell(&mut self, pos: Position, value: u8, hole: Hole) {
        let i = self.values.index_of(pos);
        self.values.as_mut_slice()[i] = value;
        self.holes.as_mut_slice()[i] = hole;
    }

    fn marks_mut(&mut self, pos: Position) -> &mut CandidateSet {
        let i = self.marks.index_of(pos);
        &mut self.marks.as_mut_slice()[i]
    }

    fn is_filled(&self, pos: Position) -> bool {
        self.values[pos] != 0 || self.holes[pos].is_cross()
    }
}

const fn is_locked(clue: SaladClue) -> bool {
    matches!(clue, SaladClue::Symbol(_) | SaladClue::Cross)
}

/// What a place or toggle move writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaladMark {
    /// A symbol, `1..=symbols`.
    Symbol(u8),
    /// A hole.
    Cross,
    /// A cell known to hold a symbol.
    Circle,
}

/// A Salad move.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SaladMove {
    /// `R<x>,<y>,<c>`: writes a symbol, a cross or a circle.
    Place(Position, SaladMark),
    /// `P<x>,<y>,<c>`: toggles a pencil mark. `X` toggles the hole mark and
    /// `O` toggles the circle.
    Toggle(Position, SaladMark),
    /// `R<x>,<y>,-`: empties a cell, or clears its marks if already empty.
    Clear(Position),
    /// `S...`: loads a full solution, `None` for holes.
    Solve(Vec<Option<u8>>),
    /// `M`: fills every empty cell with all marks.
    FillCandidates,
}

fn parse_symbol(params: &SaladParams, c: char) -> Result<u8, MoveError> {
    let value = match c {
        '1'..='9' => c as u8 - b'0',
        'A'..='I' => c as u8 - b'A' + 1,
        _ => return Err(MoveError::InvalidValue { value: c }),
    };
    if value > params.symbol_count() {
        return Err(MoveError::InvalidValue { value: c });
    }
    Ok(value)
}

pub(super) fn parse_move(params: &SaladParams, token: &str) -> Result<SaladMove, MoveError> {
    let mut chars = token.chars();
    let tag = chars.next().ok_or(MoveError::Empty)?;
    let body = chars.as_str();
    match tag {
        'M' if body.is_empty() => Ok(SaladMove::FillCandidates),
        'S' => {
            let cells = body
                .chars()
                .map(|c| match c {
                    'X' => Ok(None),
                    _ => parse_symbol(params, c).map(Some),
                })
                .collect::<Result<Vec<_>, _>>()?;
            let expected = params.order * params.order;
            if cells.len() != expected {
                return Err(MoveError::SolutionLength {
                    expected,
                    actual: cells.len(),
                });
            }
            Ok(SaladMove::Solve(cells))
        }
        'R' | 'P' => {
            let (x, y, c) = cell_move_args(token, body)?;
            if x >= params.order || y >= params.order {
                return Err(MoveError::OutOfRange { x, y });
            }
            let pos = Position::new(x, y);
            let mark = match c {
                '-' => return Ok(SaladMove::Clear(pos)),
                'X' => SaladMark::Cross,
                'O' => SaladMark::Circle,
                _ => SaladMark::Symbol(parse_symbol(params, c)?),
            };
            Ok(if tag == 'R' {
                SaladMove::Place(pos, mark)
            } else {
                SaladMove::Toggle(pos, mark)
            })
        }
        'M' => Err(MoveError::Malformed {
            token: token.to_owned(),
        }),
        _ => Err(MoveError::UnknownTag { tag }),
    }
}

pub(super) fn apply_move(
    params: &SaladParams,
    puzzle: &SaladPuzzle,
    state: &mut SaladState,
    mv: SaladMove,
) -> Result<(), MoveError> {
    let locked = |pos: Position| MoveError::CellLocked {
        x: pos.x(),
        y: pos.y(),
    };
    match mv {
        SaladMove::Place(pos, mark) => {
            let clue = puzzle.grid[pos];
            if is_locked(clue) || (clue.is_circle() && mark == SaladMark::Cross) {
                return Err(locked(pos));
            }
            let (value, hole) = match mark {
                SaladMark::Symbol(v) => (v, Hole::Circle),
                SaladMark::Cross => (0, Hole::Cross),
                SaladMark::Circle => (0, Hole::Circle),
            };
            if state.values[pos] == value && state.holes[pos] == hole {
                return Ok(());
            }
            if state.is_filled(pos) {
                return Err(locked(pos));
            }
            state.set_cell(pos, value, hole);
            if value != 0 || hole.is_cross() {
                state.marks_mut(pos).clear();
            }
        }
        SaladMove::Toggle(pos, mark) => {
            if is_locked(puzzle.grid[pos]) || state.is_filled(pos) {
                return Err(locked(pos));
            }
            match mark {
                SaladMark::Symbol(v) => state.marks_mut(pos).toggle(v),
                SaladMark::Cross => state.marks_mut(pos).toggle(params.symbol_count() + 1),
                SaladMark::Circle => {
                    if puzzle.grid[pos].is_circle() {
                        return Err(locked(pos));
                    }
                    let hole = if state.holes[pos].is_circle() {
                        Hole::Unknown
                    } else {
                        Hole::Circle
                    };
                    state.set_cell(pos, 0, hole);
                }
            }
        }
        SaladMove::Clear(pos) => {
            let clue = puzzle.grid[pos];
            if is_locked(clue) {
                return Err(locked(pos));
            }
            if !state.is_filled(pos) {
                state.marks_mut(pos).clear();
            }
            let hole = if clue.is_circle() {
                Hole::Circle
            } else {
                Hole::Unknown
            };
            state.set_cell(pos, 0, hole);
        }
        SaladMove::Solve(cells) => {
            for (i, cell) in cells.into_iter().enumerate() {
                let pos = state.values.position_of(i);
                match cell {
                    Some(v) => state.set_cell(pos, v, Hole::Circle),
                    None => state.set_cell(pos, 0, Hole::Cross),
                }
                state.marks_mut(pos).clear();
            }
        }
        SaladMove::FillCandidates => {
            let symbols = CandidateSet::full(params.symbol_count());
            let mut all = symbols;
            all.insert(params.symbol_count() + 1);
            for pos in state.values.positions() {
                if state.is_filled(pos) {
                    continue;
                }
                let marks = if state.holes[pos].is_circle() {
                    symbols
                } else {
                    all
                };
                *state.marks_mut(pos) = marks;
            }
        }
    }
    Ok(())
}

/// Returns the first symbol seen from border clue `index`.
///
/// With `direct`, the scan gives up at the first cell that is neither filled
/// nor crossed.
fn scan_border(state: &SaladState, index: usize, direct: bool) -> Option<u8> {
    for pos in border_cells(state.values.width(), index) {
        let value = state.values[pos];
        if value != 0 {
            return Some(value);
        }
        if direct && !state.holes[pos].is_cross() {
            return None;
        }
    }
    None
}

pub(super) fn check(params: &SaladParams, puzzle: &SaladPuzzle, state: &mut SaladState) -> Status {
    let order = params.order;
    let symbols = params.symbols;
    let holes = params.holes();

    // Per line: crosses, then a count for each symbol.
    let mut rows = vec![vec![0_usize; symbols + 1]; order];
    let mut cols = vec![vec![0_usize; symbols + 1]; order];
    let mut empty_rows = vec![0_usize; order];
    let mut empty_cols = vec![0_usize; order];
    let mut complete = true;
    for pos in state.values.positions() {
        let (x, y) = (pos.x(), pos.y());
        let value = usize::from(state.values[pos]);
        if state.holes[pos].is_cross() {
            rows[y][0] += 1;
            cols[x][0] += 1;
        }
        if value == 0 {
            empty_rows[y] += 1;
            empty_cols[x] += 1;
            if state.holes[pos].is_circle() {
                complete = false;
            }
        } else {
            rows[y][value] += 1;
            cols[x][value] += 1;
        }
    }

    let mut invalid = false;
    for pos in state.values.positions() {
        let (x, y) = (pos.x(), pos.y());
        let value = usize::from(state.values[pos]);
        let error = if state.holes[pos].is_cross() {
            rows[y][0] > holes || cols[x][0] > holes
        } else {
            value != 0 && (rows[y][value] > 1 || cols[x][value] > 1)
        };
        let i = state.flags.index_of(pos);
        let flags = &mut state.flags.as_mut_slice()[i];
        flags.remove(CellFlags::ERRORS);
        flags.set(CellFlags::ERROR, error);
        invalid |= error;
    }

    for (index, &clue) in puzzle.border.iter().enumerate() {
        let error = clue != 0
            && scan_border(state, index, true).is_some_and(|seen| seen != clue);
        state.border_errors[index] = error;
        invalid |= error;
        if clue != 0 && scan_border(state, index, false) != Some(clue) {
            complete = false;
        }
    }

    complete &= (0..order).all(|i| {
        empty_rows[i] == holes
            && empty_cols[i] == holes
            && rows[i][1..].iter().all(|&n| n == 1)
            && cols[i][1..].iter().all(|&n| n == 1)
    });

    if invalid {
        Status::Invalid
    } else if complete {
        Status::Complete
    } else {
        Status::Incomplete
    }
}

pub(super) fn solution_move(solution: &Grid<u8>) -> String {
    let mut out = String::from("S");
    out.extend(solution.iter().map(|&v| match v {
        0 => 'X',
        v => char::from(b'0' + v),
    }));
    out
}

pub(super) fn text_format(params: &SaladParams, puzzle: &SaladPuzzle, state: &SaladState) -> String {
    let o = params.order;
    let width = 2 * o + 7;
    let mut lines = vec![vec![' '; width]; o + 4];

    for line in [1, o + 2] {
        lines[line][2] = '+';
        lines[line][width - 3] = '+';
        for c in &mut lines[line][3..width - 3] {
            *c = '-';
        }
    }
    for line in &mut lines[2..o + 2] {
        line[2] = '|';
        line[2 * o + 4] = '|';
    }

    for pos in state.values.positions() {
        let value = state.values[pos];
        let c = match (state.holes[pos], value) {
            (Hole::Cross, _) => 'x',
            (Hole::Circle, 0) => 'O',
            (Hole::Unknown, 0) => '.',
            (_, v) => params.mode.symbol_char(v),
        };
        lines[pos.y() + 2][2 * pos.x() + 4] = c;
    }

    for (index, &clue) in puzzle.border.iter().enumerate() {
        if clue == 0 {
            continue;
        }
        let c = SaladMode::Letters.symbol_char(clue);
        let k = index % o;
        match index / o {
            0 => lines[0][2 * k + 4] = c,
            1 => lines[k + 2][0] = c,
            2 => lines[o + 3][2 * k + 4] = c,
            _ => lines[k + 2][width - 1] = c,
        }
    }

    let mut out = String::with_capacity((width + 1) * (o + 4));
    for line in lines {
        out.extend(line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use gridlace_core::Difficulty;

    use super::*;
    use crate::salad::puzzle::decode;

    fn letters() -> (SaladParams, SaladPuzzle) {
        let params = SaladParams::new(5, 3, SaladMode::Letters, Difficulty::Easy);
        let puzzle = decode(&params, "BaAbiCe,").unwrap();
        (params, puzzle)
    }

    fn play(
        params: &SaladParams,
        puzzle: &SaladPuzzle,
        state: &mut SaladState,
        token: &str,
    ) -> Result<Status, MoveError> {
        let mv = parse_move(params, token)?;
        apply_move(params, puzzle, state, mv)?;
        Ok(check(params, puzzle, state))
    }

    #[test]
    fn test_parse_move() {
        let (params, _) = letters();
        assert_eq!(
            parse_move(&params, "R0,0,B"),
            Ok(SaladMove::Place(Position::new(0, 0), SaladMark::Symbol(2)))
        );
        assert_eq!(
            parse_move(&params, "P1,2,X"),
            Ok(SaladMove::Toggle(Position::new(1, 2), SaladMark::Cross))
        );
        assert_eq!(
            parse_move(&params, "R4,4,-"),
            Ok(SaladMove::Clear(Position::new(4, 4)))
        );
        assert_eq!(parse_move(&params, "M"), Ok(SaladMove::FillCandidates));
        assert_eq!(
            parse_move(&params, "R5,0,A"),
            Err(MoveError::OutOfRange { x: 5, y: 0 })
        );
        assert_eq!(
            parse_move(&params, "R0,0,D"),
            Err(MoveError::InvalidValue { value: 'D' })
        );
        assert_eq!(
            parse_move(&params, "S123"),
            Err(MoveError::SolutionLength {
                expected: 25,
                actual: 3
            })
        );
        assert_eq!(parse_move(&params, "Q"), Err(MoveError::UnknownTag { tag: 'Q' }));
        assert!(parse_move(&params, "R0,0").is_err());
    }

    #[test]
    fn test_place_clears_marks_and_locks_cell() {
        let (params, puzzle) = letters();
        let mut state = SaladState::new(&puzzle);
        let pos = Position::new(0, 0);
        play(&params, &puzzle, &mut state, "P0,0,A").unwrap();
        assert!(state.marks(pos).contains(1));

        let status = play(&params, &puzzle, &mut state, "R0,0,B").unwrap();
        assert_eq!(status, Status::Incomplete);
        assert_eq!(state.value(pos), 2);
        assert!(state.marks(pos).is_empty());
        assert!(!state.flags(pos).has_error());
        assert!(!state.border_error(0));

        let again = play(&params, &puzzle, &mut state.clone(), "R0,0,B");
        assert_eq!(again, Ok(Status::Incomplete));
        assert_eq!(
            play(&params, &puzzle, &mut state, "R0,0,A"),
            Err(MoveError::CellLocked { x: 0, y: 0 })
        );
        assert_eq!(
            play(&params, &puzzle, &mut state, "R0,0,X"),
            Err(MoveError::CellLocked { x: 0, y: 0 })
        );

        play(&params, &puzzle, &mut state, "R0,0,-").unwrap();
        play(&params, &puzzle, &mut state, "R0,0,A").unwrap();
        assert_eq!(state.value(pos), 1);
        assert!(state.border_error(0));
        assert_eq!(check(&params, &puzzle, &mut state), Status::Invalid);
    }

    #[test]
    fn test_duplicates_and_extra_crosses_are_errors() {
        let (params, puzzle) = letters();
        let mut state = SaladState::new(&puzzle);
        play(&params, &puzzle, &mut state, "R1,1,A").unwrap();
        let status = play(&params, &puzzle, &mut state, "R3,1,A").unwrap();
        assert_eq!(status, Status::Invalid);
        assert!(state.flags(Position::new(1, 1)).contains(CellFlags::ERROR));
        play(&params, &puzzle, &mut state, "R3,1,-").unwrap();
        assert!(!state.flags(Position::new(1, 1)).has_error());

        for x in 0..3 {
            play(&params, &puzzle, &mut state, &format!("R{x},4,X")).unwrap();
        }
        assert!(state.flags(Position::new(0, 4)).contains(CellFlags::ERROR));
    }

    #[test]
    fn test_fill_candidates_respects_circles() {
        let params = SaladParams::new(4, 2, SaladMode::Numbers, Difficulty::Easy);
        let puzzle = decode(&params, "OaXm").unwrap();
        let mut state = SaladState::new(&puzzle);
        play(&params, &puzzle, &mut state, "M").unwrap();
        assert_eq!(state.marks(Position::new(0, 0)).iter().collect::<Vec<_>>(), [1, 2]);
        assert_eq!(state.marks(Position::new(1, 0)).iter().collect::<Vec<_>>(), [1, 2, 3]);
        assert!(state.marks(Position::new(2, 0)).is_empty());
        assert_eq!(
            play(&params, &puzzle, &mut state, "R0,0,X"),
            Err(MoveError::CellLocked { x: 0, y: 0 })
        );
        assert_eq!(
            play(&params, &puzzle, &mut state, "R2,0,1"),
            Err(MoveError::CellLocked { x: 2, y: 0 })
        );
        play(&params, &puzzle, &mut state, "R0,0,1").unwrap();
        assert_eq!(state.value(Position::new(0, 0)), 1);
    }

    #[test]
    fn test_solution_load_completes() {
        let params = SaladParams::new(3, 2, SaladMode::Numbers, Difficulty::Easy);
        let puzzle = SaladPuzzle::empty(3);
        let mut state = SaladState::new(&puzzle);
        let status = play(&params, &puzzle, &mut state, "S12X2X1X12").unwrap();
        assert_eq!(status, Status::Complete);
        let status = play(&params, &puzzle, &mut state, "S12X2X11X2").unwrap();
        assert_eq!(status, Status::Invalid);
    }

    #[test]
    fn test_text_format() {
        let (params, puzzle) = letters();
        let mut state = SaladState::new(&puzzle);
        play(&params, &puzzle, &mut state, "R0,0,B").unwrap();
        play(&params, &puzzle, &mut state, "R1,0,X").unwrap();
        play(&params, &puzzle, &mut state, "R2,0,O").unwrap();
        let text = text_format(&params, &puzzle, &state);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "    B   A        ");
        assert_eq!(lines[1], "  +-----------+  ");
        assert_eq!(lines[2], "  | B x O . . |  ");
        assert_eq!(lines[6], "  | . . . . . |  ");
        assert_eq!(lines[7], "  +-----------+  ");
        assert_eq!(lines[8], "            C    ");
        assert!(lines.iter().all(|line| line.chars().count() == 17));
    }
}
