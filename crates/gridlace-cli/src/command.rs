use std::fmt::Write as _;

use gridlace_core::{Difficulty, PresetCatalog, PuzzleEngine};
use gridlace_game::{Game, GameError};
use gridlace_generator::{GeneratorOptions, PuzzleGenerator};
use gridlace_puzzles::{Mathrax, Salad, Spokes};
use rayon::prelude::*;

use crate::{
    args::{Command, EngineKind, GenerateArgs},
    error::CliError,
};

impl Command {
    fn engine(&self) -> EngineKind {
        match self {
            Self::Presets { engine }
            | Self::Solve { engine, .. }
            | Self::Play { engine, .. } => *engine,
            Self::Generate(args) => args.engine,
        }
    }
}

/// Runs `command` and returns what it prints.
pub fn run(command: &Command) -> Result<String, CliError> {
    match command.engine() {
        EngineKind::Salad => run_with::<Salad>(command),
        EngineKind::Mathrax => run_with::<Mathrax>(command),
        EngineKind::Spokes => run_with::<Spokes>(command),
    }
}

fn run_with<E: PuzzleEngine>(command: &Command) -> Result<String, CliError> {
    match command {
        Command::Presets { .. } => Ok(presets::<E>()),
        Command::Generate(args) => generate::<E>(args),
        Command::Solve { id, max, .. } => solve::<E>(id, *max),
        Command::Play {
            id, moves, solve, ..
        } => play::<E>(id, moves, *solve),
    }
}

fn presets<E: PuzzleEngine>() -> String {
    let catalog = PresetCatalog::new(E::presets());
    let mut out = String::new();
    for (i, preset) in catalog.iter().enumerate() {
        let _ = writeln!(out, "{i:>3}  {:<20} {}", preset.name, preset.params);
    }
    out
}

fn resolve_params<E: PuzzleEngine>(
    params: Option<&str>,
    preset: Option<&str>,
) -> Result<E::Params, CliError> {
    if let Some(params) = params {
        return Ok(params.parse()?);
    }
    let catalog = PresetCatalog::new(E::presets());
    let found = match preset {
        Some(name) => catalog.find(name),
        None => catalog.default_preset(),
    };
    found
        .map(|preset| preset.params.clone())
        .ok_or_else(|| CliError::UnknownPreset {
            name: preset.unwrap_or("default").to_owned(),
        })
}

fn generate<E: PuzzleEngine>(args: &GenerateArgs) -> Result<String, CliError> {
    if args.count == 0 {
        return Err(CliError::ZeroCount);
    }
    let params = resolve_params::<E>(args.params.as_deref(), args.preset.as_deref())?;
    let generator = PuzzleGenerator::<E>::new(params)?.with_options(GeneratorOptions {
        symmetry: args.symmetry,
        max_attempts: args.max_attempts,
    });
    log::info!("generating {} {} puzzle(s) for {}", args.count, E::NAME, generator.params());

    // Every job gets its own seed; a single puzzle uses the given seed as is.
    let seeds: Vec<_> = (0..args.count)
        .map(|i| match args.seed {
            Some(seed) if args.count > 1 => Some(seed.derive(i as u64)),
            seed => seed,
        })
        .collect();
    let results: Vec<_> = seeds
        .into_par_iter()
        .map(|seed| match seed {
            Some(seed) => generator.generate_with_seed(seed),
            None => generator.generate(),
        })
        .collect();

    let mut out = String::new();
    for result in results {
        let puzzle = result?;
        let _ = writeln!(out, "{}:{}", puzzle.params, puzzle.descriptor);
        let _ = writeln!(out, "  seed {} ({} attempts)", puzzle.seed, puzzle.attempts);
        if args.show {
            let _ = writeln!(out, "{}", Game::from_generated(&puzzle).text());
        }
    }
    Ok(out)
}

/// Splits a game id into params and descriptor.
fn parse_id<E: PuzzleEngine>(id: &str) -> Result<(E::Params, &str), CliError> {
    let (params, descriptor) = id
        .split_once(':')
        .ok_or_else(|| CliError::MissingSeparator { id: id.to_owned() })?;
    let params: E::Params = params.parse()?;
    E::validate_params(&params)?;
    Ok((params, descriptor))
}

fn solve<E: PuzzleEngine>(id: &str, max: Difficulty) -> Result<String, CliError> {
    let (params, descriptor) = parse_id::<E>(id)?;
    let puzzle = E::decode(&params, descriptor)?;
    let report = E::solve(&params, &puzzle, max);
    log::debug!("{} {params}: {}", E::NAME, report.outcome);

    let mut out = format!("{}\n", report.outcome);
    if report.is_complete() {
        let solved = Game::<E>::from_puzzle(params, puzzle).solve()?;
        out.push_str(&solved.text());
    }
    Ok(out)
}

fn play<E: PuzzleEngine>(id: &str, moves: &str, solve: bool) -> Result<String, CliError> {
    let (params, descriptor) = parse_id::<E>(id)?;
    let mut game = Game::<E>::new(params, descriptor)?;
    if !moves.trim().is_empty() {
        game = game.apply(moves).map_err(GameError::from)?;
    }
    if solve {
        game = game.solve()?;
    }

    let mut out = game.text();
    let _ = write!(out, "status: {}", game.status());
    if game.is_cheated() {
        out.push_str(" (solution loaded)");
    }
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use gridlace_core::MoveError;
    use gridlace_generator::{PuzzleSeed, Symmetry};

    use super::*;

    fn generate_args(engine: EngineKind, params: &str, count: usize) -> GenerateArgs {
        GenerateArgs {
            engine,
            params: Some(params.to_owned()),
            preset: None,
            seed: Some(PuzzleSeed::new([9; 32])),
            count,
            symmetry: Symmetry::None,
            max_attempts: None,
            show: false,
        }
    }

    #[test]
    fn test_presets() {
        let out = run(&Command::Presets {
            engine: EngineKind::Mathrax,
        })
        .unwrap();
        assert!(out.lines().next().unwrap().contains("5x5 Easy"));
        assert_eq!(out.lines().count(), Mathrax::presets().len());
    }

    #[test]
    fn test_resolve_params() {
        let default = resolve_params::<Spokes>(None, None).unwrap();
        assert_eq!(Some(&default), Spokes::presets().first().map(|p| &p.params));
        let tricky = resolve_params::<Spokes>(None, Some("4X4 TRICKY")).unwrap();
        assert_eq!(tricky.to_string(), "4x4dt");
        assert!(matches!(
            resolve_params::<Spokes>(None, Some("huge")),
            Err(CliError::UnknownPreset { .. })
        ));
        assert!(matches!(
            resolve_params::<Spokes>(Some("4y4"), None),
            Err(CliError::Params(_))
        ));
    }

    #[test]
    fn test_generate_is_reproducible() {
        let command = Command::Generate(generate_args(EngineKind::Mathrax, "4de", 3));
        let out = run(&command).unwrap();
        assert_eq!(out.lines().filter(|line| line.contains(':')).count(), 3);
        assert_eq!(run(&command).unwrap(), out);

        let none = Command::Generate(generate_args(EngineKind::Mathrax, "4de", 0));
        assert!(matches!(run(&none), Err(CliError::ZeroCount)));
    }

    #[test]
    fn test_generate_rejects_params() {
        let command = Command::Generate(generate_args(EngineKind::Spokes, "1x1de", 1));
        assert!(matches!(run(&command), Err(CliError::Generate(_))));
    }

    #[test]
    fn test_solve() {
        let out = solve::<Spokes>("2x2dt:2222", Difficulty::Tricky).unwrap();
        assert_eq!(out, "solved (Tricky)\n2-2\n| |\n2-2\n");
        let out = solve::<Spokes>("2x2dt:2222", Difficulty::Easy).unwrap();
        assert_eq!(out, "unfinished\n");
        assert!(matches!(
            solve::<Spokes>("2x2dt", Difficulty::Easy),
            Err(CliError::MissingSeparator { .. })
        ));
        assert!(matches!(
            solve::<Spokes>("2x2dt:22", Difficulty::Easy),
            Err(CliError::Descriptor(_))
        ));
    }

    #[test]
    fn test_play() {
        let out = play::<Spokes>("2x2de:2222", "0,0,2;0,2,2", false).unwrap();
        assert_eq!(out, "2-2\n|  \n2 2\nstatus: incomplete\n");
        let out = play::<Spokes>("2x2de:2222", "0,0,2;0,2,2;1,2,2;2,0,2", false).unwrap();
        assert_eq!(out, "2-2\n| |\n2-2\nstatus: complete\n");
        let out = play::<Spokes>("2x2de:2222", "", true).unwrap();
        assert_eq!(out, "2-2\n| |\n2-2\nstatus: complete (solution loaded)\n");
        assert!(matches!(
            play::<Spokes>("2x2de:2222", "9,0,2", false),
            Err(CliError::Game(GameError::Move(MoveError::OutOfRange { .. })))
        ));
    }
}
