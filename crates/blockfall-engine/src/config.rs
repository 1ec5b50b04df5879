use std::{ops::RangeInclusive, time::Duration};

use serde::{Deserialize, Serialize};

/// Tunable rules of a game session.
///
/// All durations are in milliseconds. Missing fields in a deserialized
/// config take their [`Default`] values, so a JSON file only needs to list
/// what it changes:
///
/// ```
/// use blockfall_engine::GameConfig;
///
/// let config: GameConfig = serde_json::from_str(r#"{ "width": 12 }"#).unwrap();
/// assert_eq!(config.width, 12);
/// assert_eq!(config.height, 20);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub base_fall_interval_ms: u64,
    pub min_fall_interval_ms: u64,
    pub fall_interval_step_ms: u64,
    pub lines_per_level: usize,
    pub clear_animation_ms: u64,
    pub random_block_interval_ms: (u64, u64),
    pub score_per_line: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 20,
            base_fall_interval_ms: 1000,
            min_fall_interval_ms: 100,
            fall_interval_step_ms: 100,
            lines_per_level: 10,
            clear_animation_ms: 800,
            random_block_interval_ms: (15_000, 30_000),
            score_per_line: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("field must be at least 6x4, got {width}x{height}")]
    FieldTooSmall { width: usize, height: usize },
    #[display("minimum fall interval {min_ms}ms exceeds base fall interval {base_ms}ms")]
    FallIntervalFloorAboveBase { min_ms: u64, base_ms: u64 },
    #[display("minimum fall interval must be positive")]
    ZeroFallInterval,
    #[display("random block interval range {min_ms}..={max_ms}ms is empty")]
    EmptyRandomBlockInterval { min_ms: u64, max_ms: u64 },
    #[display("lines per level must be positive")]
    ZeroLinesPerLevel,
}

// Narrowest field where the horizontal I-piece fits at the spawn column.
const MIN_WIDTH: usize = 6;
const MIN_HEIGHT: usize = 4;

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_WIDTH || self.height < MIN_HEIGHT {
            return Err(ConfigError::FieldTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if self.min_fall_interval_ms == 0 {
            return Err(ConfigError::ZeroFallInterval);
        }
        if self.min_fall_interval_ms > self.base_fall_interval_ms {
            return Err(ConfigError::FallIntervalFloorAboveBase {
                min_ms: self.min_fall_interval_ms,
                base_ms: self.base_fall_interval_ms,
            });
        }
        let (min_ms, max_ms) = self.random_block_interval_ms;
        if min_ms > max_ms {
            return Err(ConfigError::EmptyRandomBlockInterval { min_ms, max_ms });
        }
        if self.lines_per_level == 0 {
            return Err(ConfigError::ZeroLinesPerLevel);
        }
        Ok(())
    }

    /// Returns the auto-drop interval at `level` (1-based).
    ///
    /// `base - (level - 1) * step`, floored at the minimum interval.
    ///
    /// ```
    /// use std::time::Duration;
    /// use blockfall_engine::GameConfig;
    ///
    /// let config = GameConfig::default();
    /// assert_eq!(config.fall_interval(1), Duration::from_millis(1000));
    /// assert_eq!(config.fall_interval(2), Duration::from_millis(900));
    /// assert_eq!(config.fall_interval(11), Duration::from_millis(100));
    /// assert_eq!(config.fall_interval(50), Duration::from_millis(100));
    /// ```
    #[must_use]
    pub fn fall_interval(&self, level: usize) -> Duration {
        let steps = u64::try_from(level.saturating_sub(1)).unwrap_or(u64::MAX);
        let millis = self
            .base_fall_interval_ms
            .saturating_sub(steps.saturating_mul(self.fall_interval_step_ms))
            .max(self.min_fall_interval_ms);
        Duration::from_millis(millis)
    }

    #[must_use]
    pub fn clear_animation(&self) -> Duration {
        Duration::from_millis(self.clear_animation_ms)
    }

    #[must_use]
    pub fn random_block_interval(&self) -> RangeInclusive<u64> {
        let (min_ms, max_ms) = self.random_block_interval_ms;
        min_ms..=max_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_field_too_small() {
        let config = GameConfig {
            width: 5,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::FieldTooSmall {
                width: 5,
                height: 20
            })
        );
    }

    #[test]
    fn test_floor_above_base() {
        let config = GameConfig {
            base_fall_interval_ms: 50,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FallIntervalFloorAboveBase { .. })
        ));
    }

    #[test]
    fn test_empty_random_interval() {
        let config = GameConfig {
            random_block_interval_ms: (30_000, 15_000),
            ..GameConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "random block interval range 30000..=15000ms is empty"
        );
    }

    #[test]
    fn test_zero_lines_per_level() {
        let config = GameConfig {
            lines_per_level: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroLinesPerLevel));
    }

    #[test]
    fn test_fall_interval_progression() {
        let config = GameConfig::default();
        let intervals: Vec<_> = (1..=12)
            .map(|level| config.fall_interval(level).as_millis())
            .collect();
        assert_eq!(
            intervals,
            vec![1000, 900, 800, 700, 600, 500, 400, 300, 200, 100, 100, 100]
        );
    }
}
