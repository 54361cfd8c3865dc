use std::fmt::{self, Debug};

use gridlace_core::{ClueSlot, PuzzleEngine, PuzzleRng};
use rand::seq::SliceRandom as _;

use crate::{GenerateError, Orbit, PuzzleSeed, Symmetry};

/// Tuning knobs of the generator loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeneratorOptions {
    /// Symmetry imposed on layers that opt in.
    pub symmetry: Symmetry,
    /// Maximum number of attempts, or `None` to retry until success.
    pub max_attempts: Option<usize>,
}

/// A generated puzzle with its unique solution.
pub struct GeneratedPuzzle<E: PuzzleEngine> {
    /// The parameters the puzzle was generated for.
    pub params: E::Params,
    /// The puzzle content.
    pub puzzle: E::Puzzle,
    /// The unique solution.
    pub solution: E::Solution,
    /// The puzzle encoded as a descriptor string.
    pub descriptor: String,
    /// The seed that reproduces this run.
    pub seed: PuzzleSeed,
    /// Number of attempts made, including the successful one.
    pub attempts: usize,
}

impl<E: PuzzleEngine> Debug for GeneratedPuzzle<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedPuzzle")
            .field("params", &self.params)
            .field("puzzle", &self.puzzle)
            .field("solution", &self.solution)
            .field("descriptor", &self.descriptor)
            .field("seed", &self.seed)
            .field("attempts", &self.attempts)
            .finish()
    }
}

impl<E: PuzzleEngine> Clone for GeneratedPuzzle<E> {
    fn clone(&self) -> Self {
        Self {
            params: self.params.clone(),
            puzzle: self.puzzle.clone(),
            solution: self.solution.clone(),
            descriptor: self.descriptor.clone(),
            seed: self.seed,
            attempts: self.attempts,
        }
    }
}

/// Generates puzzles with a unique solution at an exact difficulty.
///
/// Each attempt seeds a fully clued draft, strips clues while the puzzle
/// still solves at the target difficulty, and finally discards the result if
/// it already solves at the next lower tier the engine supports.
pub struct PuzzleGenerator<E: PuzzleEngine> {
    params: E::Params,
    options: GeneratorOptions,
}

impl<E: PuzzleEngine> Debug for PuzzleGenerator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PuzzleGenerator")
            .field("engine", &E::NAME)
            .field("params", &self.params)
            .field("options", &self.options)
            .finish()
    }
}

impl<E: PuzzleEngine> PuzzleGenerator<E> {
    /// Creates a generator for `params`.
    ///
    /// # Errors
    ///
    /// Returns the engine's [`ParamsError`](gridlace_core::ParamsError) if
    /// the parameters are out of bounds.
    pub fn new(params: E::Params) -> Result<Self, GenerateError> {
        E::validate_params(&params)?;
        Ok(Self {
            params,
            options: GeneratorOptions::default(),
        })
    }

    /// Replaces the generator options.
    #[must_use]
    pub fn with_options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the parameters.
    #[must_use]
    pub fn params(&self) -> &E::Params {
        &self.params
    }

    /// Returns the options.
    #[must_use]
    pub fn options(&self) -> GeneratorOptions {
        self.options
    }

    /// Generates a puzzle from a fresh random seed.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Entropy`] if no seed can be drawn, or
    /// [`GenerateError::Exhausted`] if the attempt budget runs out.
    pub fn generate(&self) -> Result<GeneratedPuzzle<E>, GenerateError> {
        let seed = PuzzleSeed::random()?;
        self.generate_with_seed(seed)
    }

    /// Generates a puzzle reproducibly from `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Exhausted`] if the attempt budget runs out.
    pub fn generate_with_seed(&self, seed: PuzzleSeed) -> Result<GeneratedPuzzle<E>, GenerateError> {
        let mut attempt = 0_usize;
        loop {
            if self.options.max_attempts.is_some_and(|max| attempt >= max) {
                log::debug!("{}: giving up after {attempt} attempts", E::NAME);
                return Err(GenerateError::Exhausted { attempts: attempt });
            }
            let mut rng = seed.derive(attempt as u64).rng();
            attempt += 1;
            if let Some((puzzle, solution)) = self.attempt(&mut rng, attempt) {
                let descriptor = E::encode(&self.params, &puzzle);
                log::info!(
                    "{} {}: generated {descriptor} after {attempt} attempts",
                    E::NAME,
                    self.params
                );
                return Ok(GeneratedPuzzle {
                    params: self.params.clone(),
                    puzzle,
                    solution,
                    descriptor,
                    seed,
                    attempts: attempt,
                });
            }
        }
    }

    fn attempt(&self, rng: &mut PuzzleRng, attempt: usize) -> Option<(E::Puzzle, E::Solution)> {
        let params = &self.params;
        let target = E::difficulty(params);

        let mut draft = E::seed(params, rng);
        if !E::solve(params, &E::finish(params, &draft), target).is_complete() {
            log::debug!("{} attempt {attempt}: seed does not solve at {target}", E::NAME);
            return None;
        }

        for (index, layer) in E::clue_layers(params).iter().enumerate() {
            let symmetry = if layer.symmetric {
                self.options.symmetry
            } else {
                Symmetry::None
            };
            let mut orbits = symmetry.orbits(index, layer);
            orbits.shuffle(rng);
            let mut removed = 0_usize;
            for orbit in &orbits {
                while let Some(weaker) = Self::weaken_orbit(params, &draft, orbit) {
                    if !E::solve(params, &E::finish(params, &weaker), target).is_complete() {
                        break;
                    }
                    draft = weaker;
                    removed += 1;
                }
            }
            log::trace!("{} attempt {attempt}: {removed} weakenings in layer {}", E::NAME, layer.name);
        }

        let puzzle = E::finish(params, &draft);
        if !E::accept(params, &puzzle) {
            log::debug!("{} attempt {attempt}: rejected by quality check", E::NAME);
            return None;
        }
        if let Some(lower) = target.next_lower(E::difficulties())
            && E::solve(params, &puzzle, lower).is_complete()
        {
            log::debug!("{} attempt {attempt}: too easy, solves at {lower}", E::NAME);
            return None;
        }

        let report = E::solve(params, &puzzle, target);
        let Some(solution) = report.solution else {
            log::debug!("{} attempt {attempt}: final solve failed", E::NAME);
            return None;
        };
        Some((puzzle, solution))
    }

    /// Weakens the clued slots of `orbit` together until the whole orbit is
    /// clued or the whole orbit is bare.
    ///
    /// Returns `None` if nothing is clued or any slot refuses.
    fn weaken_orbit(params: &E::Params, draft: &E::Draft, orbit: &[ClueSlot]) -> Option<E::Draft> {
        let clued = |draft: &E::Draft| -> Orbit {
            orbit
                .iter()
                .copied()
                .filter(|&slot| E::is_clued(params, draft, slot))
                .collect()
        };
        let mut pending = clued(draft);
        if pending.is_empty() {
            return None;
        }
        let mut weaker = draft.clone();
        while !pending.is_empty() {
            for &slot in &pending {
                if !E::weaken(params, &mut weaker, slot) {
                    return None;
                }
            }
            pending = clued(&weaker);
            if pending.len() == orbit.len() {
                break;
            }
        }
        Some(weaker)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        fmt::{self, Display},
        str::FromStr,
    };

    use gridlace_core::{
        ClueLayer, DescriptorError, Difficulty, MoveError, ParamsError, Preset, SolveOutcome,
        SolveReport, Status,
    };

    use super::*;
    use crate::random_latin_square;

    /// A row of `n` distinct values where blanks must be filled in. Easy
    /// deduction fills a single blank; nothing fills more.
    #[derive(Debug)]
    struct Row;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct RowParams {
        n: usize,
        difficulty: Difficulty,
    }

    impl Display for RowParams {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}d{}", self.n, self.difficulty.to_char())
        }
    }

    impl FromStr for RowParams {
        type Err = ParamsError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            let malformed = || ParamsError::Malformed {
                input: s.to_owned(),
            };
            let (n, d) = s.split_once('d').ok_or_else(malformed)?;
            Ok(Self {
                n: n.parse().map_err(|_| malformed())?,
                difficulty: d.parse()?,
            })
        }
    }

    impl PuzzleEngine for Row {
        const NAME: &'static str = "Row";

        type Params = RowParams;
        type Puzzle = Vec<u8>;
        type Solution = Vec<u8>;
        type Draft = Vec<u8>;
        type State = Vec<u8>;
        type Move = (usize, u8);

        fn difficulties() -> &'static [Difficulty] {
            &[Difficulty::Easy, Difficulty::Hard]
        }

        fn presets() -> Vec<Preset<RowParams>> {
            vec![]
        }

        fn validate_params(params: &RowParams) -> Result<(), ParamsError> {
            if params.n < 2 {
                return Err(ParamsError::TooSmall { what: "n", min: 2 });
            }
            params.difficulty.ensure_supported(Self::NAME, Self::difficulties())
        }

        fn difficulty(params: &RowParams) -> Difficulty {
            params.difficulty
        }

        fn encode(_params: &RowParams, puzzle: &Vec<u8>) -> String {
            puzzle.iter().map(u8::to_string).collect::<Vec<_>>().join(",")
        }

        fn decode(_params: &RowParams, desc: &str) -> Result<Vec<u8>, DescriptorError> {
            desc.split(',')
                .map(|t| {
                    t.parse().map_err(|_| DescriptorError::Inconsistent {
                        section: "row",
                    })
                })
                .collect()
        }

        fn solve(_params: &RowParams, puzzle: &Vec<u8>, max: Difficulty) -> SolveReport<Vec<u8>> {
            let blanks: Vec<usize> = (0..puzzle.len()).filter(|&i| puzzle[i] == 0).collect();
            match blanks.as_slice() {
                [] => SolveReport::solved(Difficulty::Easy, puzzle.clone()),
                [i] => {
                    let mut solution = puzzle.clone();
                    #[expect(clippy::cast_possible_truncation)]
                    let missing = (1..=puzzle.len() as u8)
                        .find(|v| !puzzle.contains(v))
                        .unwrap();
                    solution[*i] = missing;
                    SolveReport::solved(Difficulty::Easy, solution)
                }
                _ if max >= Difficulty::Hard => SolveReport::unsolved(SolveOutcome::Ambiguous),
                _ => SolveReport::unsolved(SolveOutcome::Unfinished),
            }
        }

        fn seed(params: &RowParams, rng: &mut PuzzleRng) -> Vec<u8> {
            random_latin_square(params.n, rng).row(0).to_vec()
        }

        fn clue_layers(params: &RowParams) -> Vec<ClueLayer> {
            vec![ClueLayer {
                name: "values",
                width: params.n,
                height: 1,
                symmetric: true,
            }]
        }

        fn weaken(_params: &RowParams, draft: &mut Vec<u8>, slot: ClueSlot) -> bool {
            std::mem::take(&mut draft[slot.x]) != 0
        }

        fn is_clued(_params: &RowParams, draft: &Vec<u8>, slot: ClueSlot) -> bool {
            draft[slot.x] != 0
        }

        fn finish(_params: &RowParams, draft: &Vec<u8>) -> Vec<u8> {
            draft.clone()
        }

        fn new_state(_params: &RowParams, puzzle: &Vec<u8>) -> Vec<u8> {
            puzzle.clone()
        }

        fn parse_move(_params: &RowParams, token: &str) -> Result<(usize, u8), MoveError> {
            Err(MoveError::Malformed {
                token: token.to_owned(),
            })
        }

        fn apply_move(
            _params: &RowParams,
            _puzzle: &Vec<u8>,
            state: &mut Vec<u8>,
            (i, v): (usize, u8),
        ) -> Result<(), MoveError> {
            state[i] = v;
            Ok(())
        }

        fn loads_solution(_mv: &(usize, u8)) -> bool {
            false
        }

        fn check(_params: &RowParams, _puzzle: &Vec<u8>, state: &mut Vec<u8>) -> Status {
            if state.contains(&0) {
                Status::Incomplete
            } else {
                Status::Complete
            }
        }

        fn solution_move(_params: &RowParams, _puzzle: &Vec<u8>) -> Option<String> {
            None
        }

        fn text_format(params: &RowParams, puzzle: &Vec<u8>, _state: &Vec<u8>) -> String {
            Self::encode(params, puzzle)
        }
    }

    fn params(n: usize, difficulty: Difficulty) -> RowParams {
        RowParams { n, difficulty }
    }

    #[test]
    fn test_generate_strips_to_one_blank() {
        let generator = PuzzleGenerator::<Row>::new(params(6, Difficulty::Easy)).unwrap();
        let puzzle = generator
            .generate_with_seed(PuzzleSeed::new([3; 32]))
            .unwrap();
        assert_eq!(puzzle.puzzle.iter().filter(|&&v| v == 0).count(), 1);
        assert_eq!(puzzle.attempts, 1);
        assert_eq!(puzzle.descriptor, Row::encode(&puzzle.params, &puzzle.puzzle));
        let mut sorted = puzzle.solution.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_same_seed_same_puzzle() {
        let generator = PuzzleGenerator::<Row>::new(params(5, Difficulty::Easy)).unwrap();
        let seed = PuzzleSeed::new([9; 32]);
        let a = generator.generate_with_seed(seed).unwrap();
        let b = generator.generate_with_seed(seed).unwrap();
        assert_eq!(a.descriptor, b.descriptor);
        assert_eq!(a.solution, b.solution);
    }

    #[test]
    fn test_floor_exhausts_budget() {
        // Every puzzle Hard can certify is also Easy.
        let generator = PuzzleGenerator::<Row>::new(params(5, Difficulty::Hard))
            .unwrap()
            .with_options(GeneratorOptions {
                symmetry: Symmetry::None,
                max_attempts: Some(3),
            });
        assert_eq!(
            generator
                .generate_with_seed(PuzzleSeed::new([0; 32]))
                .unwrap_err(),
            GenerateError::Exhausted { attempts: 3 }
        );
    }

    #[test]
    fn test_invalid_params_are_refused() {
        assert!(matches!(
            PuzzleGenerator::<Row>::new(params(1, Difficulty::Easy)),
            Err(GenerateError::InvalidParams(ParamsError::TooSmall { .. }))
        ));
        assert!(matches!(
            PuzzleGenerator::<Row>::new(params(4, Difficulty::Tricky)),
            Err(GenerateError::InvalidParams(
                ParamsError::UnsupportedDifficulty { .. }
            ))
        ));
    }

    #[test]
    fn test_orbit_weakens_clued_slots_together() {
        let params = params(5, Difficulty::Easy);
        let orbit = |xs: &[usize]| -> Vec<ClueSlot> {
            xs.iter().map(|&x| ClueSlot { layer: 0, x, y: 0 }).collect()
        };
        let draft = vec![1, 2, 0, 4, 5];
        let weaken =
            |orbit: &[ClueSlot]| PuzzleGenerator::<Row>::weaken_orbit(&params, &draft, orbit);

        assert_eq!(weaken(&orbit(&[0, 4])), Some(vec![0, 2, 0, 4, 0]));
        // The bare slot of a mixed orbit stays bare while its partner goes.
        assert_eq!(weaken(&orbit(&[1, 2])), Some(vec![1, 0, 0, 4, 5]));
        assert_eq!(weaken(&orbit(&[2])), None);
    }

    #[test]
    fn test_symmetric_orbits_strip_together() {
        // With mirror symmetry the middle slot of an odd row is alone, every
        // other orbit holds two slots, so at most the center can go.
        let generator = PuzzleGenerator::<Row>::new(params(5, Difficulty::Easy))
            .unwrap()
            .with_options(GeneratorOptions {
                symmetry: Symmetry::Horizontal,
                max_attempts: None,
            });
        let puzzle = generator
            .generate_with_seed(PuzzleSeed::new([5; 32]))
            .unwrap();
        assert_eq!(puzzle.puzzle.iter().filter(|&&v| v == 0).count(), 1);
        assert_eq!(puzzle.puzzle[2], 0);
    }
}
