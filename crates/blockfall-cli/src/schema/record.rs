use std::{
    fs::{self, File},
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use blockfall_engine::{GameSession, SessionRecording};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A saved play session as written by `play --save-recording`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordFile {
    pub recorded_at: DateTime<Utc>,
    pub final_stats: FinalStats,
    pub recording: SessionRecording,
}

/// End-of-session numbers, stored next to the inputs so a replay can be checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalStats {
    pub score: u64,
    pub level: usize,
    pub cleared_lines: usize,
    pub completed_pieces: usize,
    pub line_cleared_counter: [usize; 5],
    pub game_over: bool,
}

impl FinalStats {
    pub fn from_session(session: &GameSession) -> Self {
        let stats = session.stats();
        Self {
            score: stats.score(),
            level: stats.level(),
            cleared_lines: stats.cleared_lines(),
            completed_pieces: stats.completed_pieces(),
            line_cleared_counter: *stats.line_cleared_counter(),
            game_over: session.is_game_over(),
        }
    }
}

impl RecordFile {
    pub fn new(recording: SessionRecording, session: &GameSession) -> Self {
        Self {
            recorded_at: Utc::now(),
            final_stats: FinalStats::from_session(session),
            recording,
        }
    }

    /// Saves as `{record_dir}/play_{YYYYMMDD_HHMMSS}.json` and returns the path.
    ///
    /// `record_dir` is created if it doesn't exist.
    pub fn save(&self, record_dir: &Path) -> anyhow::Result<PathBuf> {
        fs::create_dir_all(record_dir)
            .with_context(|| format!("Failed to create directory {}", record_dir.display()))?;

        let filename = format!("play_{}.json", self.recorded_at.format("%Y%m%d_%H%M%S"));
        let filepath = record_dir.join(filename);

        let file = File::create(&filepath)
            .with_context(|| format!("Failed to create file: {}", filepath.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .with_context(|| format!("Failed to write JSON to {}", filepath.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to flush output to {}", filepath.display()))?;

        Ok(filepath)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        env, fs,
        time::{Duration, SystemTime, UNIX_EPOCH},
    };

    use blockfall_engine::{Command, GameConfig, Recorder};
    use chrono::TimeZone as _;

    use crate::util;

    use super::*;

    fn unique_temp_dir() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        env::temp_dir().join(format!("blockfall_record_test_{nanos}"))
    }

    fn record_file() -> RecordFile {
        let seed = "00112233445566778899aabbccddeeff".parse().unwrap();
        let mut recorder = Recorder::new(GameConfig::default(), seed).unwrap();
        for i in 0..600 {
            if i % 40 == 0 {
                recorder.apply(Command::HardDrop);
            }
            recorder.tick(Duration::from_millis(16));
        }
        let (recording, session) = recorder.into_parts();
        RecordFile::new(recording, &session)
    }

    #[test]
    fn test_json_round_trip() {
        let record = record_file();
        assert!(record.final_stats.completed_pieces > 0);

        let json = serde_json::to_string(&record).unwrap();
        let loaded: RecordFile = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.recorded_at, record.recorded_at);
        assert_eq!(loaded.final_stats, record.final_stats);
        assert_eq!(loaded.recording, record.recording);
    }

    #[test]
    fn test_final_stats_match_replay() {
        let record = record_file();
        let replayed = record.recording.replay().unwrap();
        assert_eq!(FinalStats::from_session(&replayed), record.final_stats);
    }

    #[test]
    fn test_save_uses_timestamped_name() {
        let mut record = record_file();
        record.recorded_at = Utc.with_ymd_and_hms(2026, 10, 15, 12, 34, 56).unwrap();
        let dir = unique_temp_dir().join("nested");

        let path = record.save(&dir).unwrap();
        assert_eq!(path, dir.join("play_20261015_123456.json"));

        let loaded: RecordFile = util::read_json_file("recording", &path).unwrap();
        assert_eq!(loaded.final_stats, record.final_stats);
        assert_eq!(loaded.recording, record.recording);

        fs::remove_dir_all(dir.parent().unwrap()).unwrap();
    }
}
