use serde::Serialize;

use crate::config::GameConfig;

/// Score and progression of a session.
///
/// - **Score**: each resolved clear adds `rows × score_per_line × level`,
///   using the level in effect before the clear; saturates at `u64::MAX`
/// - **Level**: `lines / lines_per_level + 1`
/// - **Completed pieces**: total number of pieces locked into the field
/// - **Line clear distribution**: placements by number of rows cleared
///
/// # Example
///
/// ```
/// use blockfall_engine::{GameConfig, GameStats};
///
/// let mut stats = GameStats::new(&GameConfig::default());
/// stats.complete_line_clear(4);
///
/// assert_eq!(stats.score(), 400);
/// assert_eq!(stats.cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStats {
    score: u64,
    completed_pieces: usize,
    cleared_lines: usize,
    line_cleared_counter: [usize; 5],
    #[serde(skip)]
    lines_per_level: usize,
    #[serde(skip)]
    score_per_line: u64,
}

impl GameStats {
    /// Creates a tracker at level 1 with all counters at zero.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            cleared_lines: 0,
            line_cleared_counter: [0; 5],
            lines_per_level: config.lines_per_level.max(1),
            score_per_line: config.score_per_line,
        }
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    /// Returns the current level, starting at 1.
    #[must_use]
    pub fn level(&self) -> usize {
        self.cleared_lines / self.lines_per_level + 1
    }

    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn cleared_lines(&self) -> usize {
        self.cleared_lines
    }

    /// Returns a histogram of placements by rows cleared.
    ///
    /// - `[0]`: placements that cleared nothing
    /// - `[1]`..`[4]`: singles, doubles, triples, and four-row clears
    ///
    /// Clears of more than four rows (possible once random blocks complete
    /// extra rows) are not counted here.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Records a piece being locked into the field.
    pub fn complete_piece_drop(&mut self, full_rows: usize) {
        self.completed_pieces += 1;
        if full_rows == 0 {
            self.line_cleared_counter[0] += 1;
        }
    }

    /// Applies a resolved clear of `rows` rows and returns whether the level went up.
    pub fn complete_line_clear(&mut self, rows: usize) -> bool {
        let level = self.level();
        let points = (rows as u64)
            .saturating_mul(self.score_per_line)
            .saturating_mul(level as u64);
        self.score = self.score.saturating_add(points);
        self.cleared_lines += rows;
        if let Some(count) = self.line_cleared_counter.get_mut(rows) {
            *count += 1;
        }
        self.level() > level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> GameStats {
        GameStats::new(&GameConfig::default())
    }

    #[test]
    fn test_initial_level_is_one() {
        let stats = stats();
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.score(), 0);
    }

    #[test]
    fn test_score_uses_level_before_clear() {
        let mut stats = stats();
        for _ in 0..9 {
            stats.complete_line_clear(1);
        }
        assert_eq!(stats.score(), 900);
        assert_eq!(stats.level(), 1);

        // 9 + 2 lines crosses into level 2, but this clear still scores at level 1
        assert!(stats.complete_line_clear(2));
        assert_eq!(stats.score(), 1100);
        assert_eq!(stats.level(), 2);

        assert!(!stats.complete_line_clear(1));
        assert_eq!(stats.score(), 1300);
    }

    #[test]
    fn test_level_after_hundred_lines() {
        let mut stats = stats();
        for _ in 0..25 {
            stats.complete_line_clear(4);
        }
        assert_eq!(stats.cleared_lines(), 100);
        assert_eq!(stats.level(), 11);
    }

    #[test]
    fn test_counter_tracks_placements() {
        let mut stats = stats();
        stats.complete_piece_drop(0);
        stats.complete_piece_drop(2);
        stats.complete_line_clear(2);
        stats.complete_piece_drop(6);
        stats.complete_line_clear(6);

        assert_eq!(stats.completed_pieces(), 3);
        assert_eq!(stats.line_cleared_counter(), &[1, 0, 1, 0, 0]);
        assert_eq!(stats.cleared_lines(), 8);
    }

    #[test]
    fn test_score_saturates() {
        let config = GameConfig {
            score_per_line: u64::MAX / 2,
            ..GameConfig::default()
        };
        let mut stats = GameStats::new(&config);
        stats.complete_line_clear(4);
        assert_eq!(stats.score(), u64::MAX);
        stats.complete_line_clear(1);
        assert_eq!(stats.score(), u64::MAX);
        assert_eq!(stats.cleared_lines(), 5);
    }
}
