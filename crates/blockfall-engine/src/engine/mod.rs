//! Session-level simulation built on the [`core`](crate::core) primitives.
//!
//! - [`GameSession`] - the controller: spawning, movement, gravity, locking
//! - [`LineClear`] - timed clear animation for completed rows
//! - [`GameStats`] - score, lines, and level progression
//! - [`ParticleSystem`] - visual fragments emitted by a clear
//! - [`RandomBlocks`] - optional timer that drops stray blocks on the stack
//! - [`PieceGenerator`] / [`GameSeed`] - seeded randomness
//! - [`GameSnapshot`] - owned render-ready state
//! - [`Recorder`] / [`SessionRecording`] - input capture and replay
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`] (optionally from a seed and a [`GameConfig`](crate::GameConfig))
//! 2. Forward player input as [`Command`]s
//! 3. Call [`GameSession::tick`] with the elapsed time every frame
//! 4. Draw [`GameSession::snapshot`]
//! 5. Repeat until [`GameSession::is_game_over`], then restart
//!
//! When a locked piece completes rows, no new piece spawns until the clear
//! animation has finished:
//!
//! ```
//! use std::time::Duration;
//! use blockfall_engine::{Command, GameSession};
//!
//! let mut session = GameSession::new();
//! while !session.is_game_over() {
//!     session.apply(Command::HardDrop);
//!     session.tick(Duration::from_millis(100));
//! }
//! assert!(session.stats().completed_pieces() > 0);
//! ```

pub use self::{
    game_session::*, game_stats::*, line_clear::*, particle::*, piece_generator::*,
    random_blocks::*, recording::*, snapshot::*,
};

mod game_session;
mod game_stats;
mod line_clear;
mod particle;
mod piece_generator;
mod random_blocks;
mod recording;
mod snapshot;
