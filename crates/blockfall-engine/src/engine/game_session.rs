use std::time::Duration;

use log::{debug, info, trace};
use rand::{Rng as _, seq::IteratorRandom as _};
use serde::{Deserialize, Serialize};

use crate::{
    config::{ConfigError, GameConfig},
    core::{
        piece::Piece,
        playfield::{Block, BlockColor, Playfield},
    },
};

use super::{
    game_stats::GameStats,
    line_clear::LineClear,
    particle::{Particle, ParticleSystem},
    piece_generator::{GameSeed, PieceGenerator},
    random_blocks::RandomBlocks,
    snapshot::GameSnapshot,
};

/// Coarse session state for presentation.
///
/// Game over takes precedence over pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    Paused,
    GameOver,
}

/// Logical player commands, one per input key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    RotateClockwise,
    HardDrop,
    TogglePause,
    ToggleRandomBlocks,
    Restart,
}

/// A complete game: playfield, falling and next piece, progression, and effects.
///
/// The session never reads the clock. Callers pass the elapsed time to
/// [`tick`](Self::tick) and forward player input as [`Command`]s, which makes
/// a session with a fixed [`GameSeed`] fully reproducible.
///
/// Invalid moves and rotations are silent no-ops reported as `false`. The only
/// terminal condition is game over, entered when a newly promoted piece does
/// not fit at the spawn position. After that, only [`restart`](Self::restart)
/// brings the session back.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use blockfall_engine::{Command, GameSession};
///
/// let mut session = GameSession::new();
/// session.apply(Command::MoveLeft);
/// session.apply(Command::HardDrop);
/// session.tick(Duration::from_millis(16));
///
/// assert_eq!(session.stats().completed_pieces(), 1);
/// assert!(session.falling_piece().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    generator: PieceGenerator,
    field: Playfield,
    falling_piece: Option<Piece>,
    next_piece: Option<Piece>,
    stats: GameStats,
    fall_interval: Duration,
    fall_timer: Duration,
    line_clear: LineClear,
    particles: ParticleSystem,
    random_blocks: RandomBlocks,
    paused: bool,
    game_over: bool,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Creates a session with the default rules and a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(GameConfig::default(), PieceGenerator::new())
    }

    /// Like [`Self::new`], but with a fixed seed.
    #[must_use]
    pub fn with_seed(seed: GameSeed) -> Self {
        Self::from_parts(GameConfig::default(), PieceGenerator::with_seed(seed))
    }

    /// Creates a session with custom rules and a fixed seed.
    pub fn with_config(config: GameConfig, seed: GameSeed) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(config, PieceGenerator::with_seed(seed)))
    }

    fn from_parts(config: GameConfig, mut generator: PieceGenerator) -> Self {
        let random_blocks = RandomBlocks::new(generator.rng(), config.random_block_interval());
        let mut this = Self {
            field: Playfield::new(config.width, config.height),
            falling_piece: None,
            next_piece: None,
            stats: GameStats::new(&config),
            fall_interval: config.fall_interval(1),
            fall_timer: Duration::ZERO,
            line_clear: LineClear::new(config.clear_animation()),
            particles: ParticleSystem::new(),
            random_blocks,
            paused: false,
            game_over: false,
            config,
            generator,
        };
        // the first call only fills the preview slot
        this.spawn_next();
        this.spawn_next();
        this
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn field(&self) -> &Playfield {
        &self.field
    }

    /// The piece under player control; `None` while a line clear is animating.
    #[must_use]
    pub fn falling_piece(&self) -> Option<&Piece> {
        self.falling_piece.as_ref()
    }

    #[must_use]
    pub fn next_piece(&self) -> Option<&Piece> {
        self.next_piece.as_ref()
    }

    /// Where the falling piece would land after a hard drop.
    #[must_use]
    pub fn ghost_piece(&self) -> Option<Piece> {
        self.falling_piece
            .as_ref()
            .map(|piece| self.field.drop_position(piece))
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// Current auto-drop interval.
    #[must_use]
    pub fn fall_interval(&self) -> Duration {
        self.fall_interval
    }

    #[must_use]
    pub fn line_clear(&self) -> &LineClear {
        &self.line_clear
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        self.particles.particles()
    }

    #[must_use]
    pub fn random_blocks(&self) -> &RandomBlocks {
        &self.random_blocks
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
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

    /// Captures everything a renderer needs for one frame.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(self)
    }

    /// Dispatches a player command to the matching method.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::MoveLeft => _ = self.move_left(),
            Command::MoveRight => _ = self.move_right(),
            Command::SoftDrop => _ = self.soft_drop(),
            Command::RotateClockwise => _ = self.rotate_clockwise(),
            Command::HardDrop => self.hard_drop(),
            Command::TogglePause => self.toggle_pause(),
            Command::ToggleRandomBlocks => self.toggle_random_blocks(),
            Command::Restart => self.restart(),
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Moves the piece down one row, locking it if it cannot move.
    pub fn soft_drop(&mut self) -> bool {
        self.try_move(0, 1)
    }

    /// Drops the piece to the lowest reachable row and locks it.
    pub fn hard_drop(&mut self) {
        while self.try_move(0, 1) {}
    }

    /// Rotates the piece 90° clockwise if the rotated piece fits.
    ///
    /// There are no wall kicks: a blocked rotation leaves the piece unchanged.
    pub fn rotate_clockwise(&mut self) -> bool {
        if !self.session_state().is_playing() {
            return false;
        }
        let Some(piece) = &self.falling_piece else {
            return false;
        };
        let rotated = piece.rotated_right();
        if !self.field.is_valid_position(&rotated) {
            return false;
        }
        self.falling_piece = Some(rotated);
        true
    }

    /// Translates the falling piece by `(dx, dy)` if the result fits.
    ///
    /// A blocked downward move (`dy > 0`) locks the piece where it is, then
    /// either starts a line clear or spawns the next piece. Returns whether
    /// the piece moved.
    pub fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        if !self.session_state().is_playing() {
            return false;
        }
        let Some(piece) = &self.falling_piece else {
            return false;
        };
        let moved = piece.moved(dx, dy);
        if self.field.is_valid_position(&moved) {
            self.falling_piece = Some(moved);
            return true;
        }
        if dy > 0 {
            self.lock_falling_piece();
        }
        false
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        debug!("paused: {}", self.paused);
    }

    pub fn toggle_random_blocks(&mut self) {
        self.random_blocks.toggle();
        debug!("random blocks: {}", self.random_blocks.is_enabled());
    }

    /// Starts a new game with the same rules.
    ///
    /// The random generator carries on from its current state, so the new
    /// game gets a different piece sequence.
    pub fn restart(&mut self) {
        info!("restarting session (final score {})", self.stats.score());
        *self = Self::from_parts(self.config.clone(), self.generator.clone());
    }

    /// Advances the simulation by `dt`.
    ///
    /// Does nothing while paused or after game over. Otherwise, in order:
    /// gravity, line-clear animation, particles, random-block injection.
    pub fn tick(&mut self, dt: Duration) {
        if !self.session_state().is_playing() {
            return;
        }

        self.fall_timer += dt;
        if self.fall_timer >= self.fall_interval {
            self.try_move(0, 1);
            self.fall_timer = Duration::ZERO;
        }

        if let Some(rows) = self.line_clear.advance(dt) {
            self.finish_line_clear(&rows);
        }

        self.particles.step();

        if self.random_blocks.advance(self.generator.rng(), dt) {
            self.inject_random_block();
        }
    }

    /// Promotes the next piece and draws a new one.
    ///
    /// Sets game over if the promoted piece does not fit; the field is left
    /// as it is.
    fn spawn_next(&mut self) {
        let next = self.generator.next_piece(self.config.width);
        let Some(piece) = self.next_piece.replace(next) else {
            return;
        };
        debug!("spawned {} piece", piece.kind());
        if !self.field.is_valid_position(&piece) {
            info!(
                "game over: no room to spawn {} (score {}, lines {})",
                piece.kind(),
                self.stats.score(),
                self.stats.cleared_lines()
            );
            self.game_over = true;
        }
        self.falling_piece = Some(piece);
    }

    fn lock_falling_piece(&mut self) {
        let Some(piece) = self.falling_piece.take() else {
            return;
        };
        self.field.fill_piece(&piece);

        let full_rows = self.field.full_rows();
        self.stats.complete_piece_drop(full_rows.len());
        if full_rows.is_empty() {
            self.spawn_next();
            return;
        }
        debug!("rows {full_rows:?} complete, starting clear animation");
        self.line_clear.begin(full_rows);
    }

    fn finish_line_clear(&mut self, rows: &[usize]) {
        self.field.remove_rows(rows);
        let leveled_up = self.stats.complete_line_clear(rows.len());
        self.fall_interval = self.config.fall_interval(self.stats.level());
        info!(
            "cleared {} rows (score {}, lines {})",
            rows.len(),
            self.stats.score(),
            self.stats.cleared_lines()
        );
        if leveled_up {
            info!(
                "level {} reached, fall interval {:?}",
                self.stats.level(),
                self.fall_interval
            );
        }

        self.particles
            .burst(self.generator.rng(), rows, self.config.width);
        self.spawn_next();
    }

    fn inject_random_block(&mut self) {
        let rng = self.generator.rng();
        let Some((x, y)) = self.field.stack_landing_cells().choose(&mut *rng) else {
            return;
        };
        let color: BlockColor = rng.random();
        trace!("random {color:?} block at ({x}, {y})");
        self.field.fill_block_at(x, y, Block::Filled(color));
    }
}
