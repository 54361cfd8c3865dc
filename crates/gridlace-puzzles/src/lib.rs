//! The gridlace puzzle engines.
//!
//! Each engine implements [`PuzzleEngine`](gridlace_core::PuzzleEngine) and
//! plugs into the generic generator and game crates:
//!
//! - [`Salad`]: a Latin square with holes, clued either by letters seen from
//!   the border (ABC End View) or by circles and crosses in the grid
//!   (Number Ball).
//! - [`Mathrax`]: a Latin square with arithmetic and parity clues on the
//!   corners shared by four cells.
//! - [`Spokes`]: numbered hubs joined by orthogonal and diagonal lines into a
//!   single network.
//!
//! # Examples
//!
//! ```
//! use gridlace_core::{Difficulty, PresetCatalog, PuzzleEngine};
//! use gridlace_generator::{PuzzleGenerator, PuzzleSeed};
//! use gridlace_puzzles::Mathrax;
//!
//! let presets = PresetCatalog::new(Mathrax::presets());
//! assert!(presets.find("5x5 easy").is_some());
//!
//! let generator = PuzzleGenerator::<Mathrax>::new("4de".parse()?)?;
//! let generated = generator.generate_with_seed(PuzzleSeed::new([7; 32]))?;
//!
//! let report = Mathrax::solve(&generated.params, &generated.puzzle, Difficulty::Recursive);
//! assert_eq!(report.solution.as_ref(), Some(&generated.solution));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{mathrax::Mathrax, salad::Salad, spokes::Spokes};

pub mod mathrax;
pub mod salad;
pub mod spokes;

mod parse;
