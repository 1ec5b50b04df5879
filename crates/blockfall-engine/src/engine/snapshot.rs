use std::time::Duration;

use serde::Serialize;

use crate::core::{piece::Piece, playfield::Block};

use super::{
    game_session::{GameSession, SessionState},
    particle::Particle,
};

/// Owned, render-ready view of a [`GameSession`] at one instant.
///
/// Renderers draw from a snapshot instead of borrowing the session, so the
/// core stays free to mutate between frames.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Grid rows from top to bottom.
    pub grid: Vec<Vec<Block>>,
    pub falling_piece: Option<Piece>,
    pub next_piece: Option<Piece>,
    pub ghost_piece: Option<Piece>,
    pub score: u64,
    pub level: usize,
    pub cleared_lines: usize,
    pub completed_pieces: usize,
    pub game_over: bool,
    pub paused: bool,
    pub clearing_rows: Vec<usize>,
    /// Clear animation progress in `[0.0, 1.0]`.
    pub clear_progress: f32,
    pub particles: Vec<Particle>,
    pub random_blocks_enabled: bool,
    pub random_block_remaining: Duration,
}

impl GameSnapshot {
    pub(crate) fn capture(session: &GameSession) -> Self {
        let field = session.field();
        let stats = session.stats();
        let line_clear = session.line_clear();
        let random_blocks = session.random_blocks();
        Self {
            width: field.width(),
            height: field.height(),
            grid: field.rows().map(<[Block]>::to_vec).collect(),
            falling_piece: session.falling_piece().cloned(),
            next_piece: session.next_piece().cloned(),
            ghost_piece: session.ghost_piece(),
            score: stats.score(),
            level: stats.level(),
            cleared_lines: stats.cleared_lines(),
            completed_pieces: stats.completed_pieces(),
            game_over: session.is_game_over(),
            paused: session.is_paused(),
            clearing_rows: line_clear.clearing_rows().to_vec(),
            clear_progress: line_clear.progress(),
            particles: session.particles().to_vec(),
            random_blocks_enabled: random_blocks.is_enabled(),
            random_block_remaining: random_blocks.remaining(),
        }
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        if self.game_over {
            SessionState::GameOver
        } else if self.paused {
            SessionState::Paused
        } else {
            SessionState::Playing
        }
    }

    /// Returns whether row `y` is part of a pending clear.
    #[must_use]
    pub fn is_clearing_row(&self, y: usize) -> bool {
        self.clearing_rows.contains(&y)
    }
}
