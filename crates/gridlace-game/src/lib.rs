//! Game sessions for gridlace engines.
//!
//! A [`Game`] wraps the parameters, the puzzle content and the play state of
//! one puzzle. Moves are applied as strings of `;`-separated tokens in the
//! engine's move grammar; [`Game::apply`] returns a new session and never
//! mutates the original, so a rejected batch leaves the prior state intact
//! and hosts can keep any undo history they like.

pub use self::{error::*, game::*};

mod error;
mod game;
