//! Simulation core for a falling-block puzzle game.
//!
//! The crate is split in two layers:
//!
//! - [`core`] - the grid, pieces, and collision rules
//! - [`engine`] - the session controller, line clears, scoring, effects, and replay
//!
//! Nothing here reads the clock or the keyboard. A front end supplies elapsed
//! time and [`Command`]s, then renders a [`GameSnapshot`].

pub use self::{config::*, core::*, engine::*};

pub mod config;
pub mod core;
pub mod engine;
