use std::path::PathBuf;

use anyhow::{Context as _, bail};
use log::warn;

use crate::{
    schema::record::{FinalStats, RecordFile},
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub struct ReplayArg {
    /// Path to the recording file (JSON format)
    recording_file: PathBuf,
    /// Write the replayed stats to this file instead of stdout
    #[clap(long)]
    output: Option<PathBuf>,
}

pub fn run(arg: &ReplayArg) -> anyhow::Result<()> {
    let ReplayArg {
        recording_file,
        output,
    } = arg;

    eprintln!("Loading recording from {}", recording_file.display());
    let record: RecordFile = util::read_json_file("recording", recording_file)?;
    eprintln!(
        "Replaying {} events (seed {})",
        record.recording.events.len(),
        record.recording.seed
    );

    let replayed = replay_stats(&record)?;
    Output::from_output_path(output.clone()).write_json(&replayed)?;
    check_replay(&record.final_stats, &replayed)
}

fn replay_stats(record: &RecordFile) -> anyhow::Result<FinalStats> {
    let session = record
        .recording
        .replay()
        .context("Recording contains an invalid game config")?;
    Ok(FinalStats::from_session(&session))
}

fn check_replay(recorded: &FinalStats, replayed: &FinalStats) -> anyhow::Result<()> {
    if replayed != recorded {
        warn!("replay diverged: recorded {recorded:?}, replayed {replayed:?}");
        bail!("Replayed stats differ from the recorded ones");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use blockfall_engine::{Command, GameConfig, RecordedEvent, Recorder};

    use super::*;

    fn record_file() -> RecordFile {
        let seed = "fedcba9876543210fedcba9876543210".parse().unwrap();
        let mut recorder = Recorder::new(GameConfig::default(), seed).unwrap();
        for i in 0..900 {
            match i % 30 {
                0 => recorder.apply(Command::MoveLeft),
                10 => recorder.apply(Command::RotateClockwise),
                20 => recorder.apply(Command::HardDrop),
                _ => {}
            }
            recorder.tick(Duration::from_millis(16));
        }
        let (recording, session) = recorder.into_parts();
        RecordFile::new(recording, &session)
    }

    #[test]
    fn test_replay_matches_recorded_stats() {
        let record = record_file();
        let replayed = replay_stats(&record).unwrap();
        assert_eq!(replayed, record.final_stats);
        assert!(check_replay(&record.final_stats, &replayed).is_ok());
    }

    #[test]
    fn test_tampered_stats_fail() {
        let mut record = record_file();
        record.final_stats.score += 100;
        let replayed = replay_stats(&record).unwrap();
        assert!(check_replay(&record.final_stats, &replayed).is_err());

        let mut record = record_file();
        record
            .recording
            .events
            .retain(|event| *event != RecordedEvent::Command(Command::HardDrop));
        let replayed = replay_stats(&record).unwrap();
        assert!(check_replay(&record.final_stats, &replayed).is_err());
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let mut record = record_file();
        record.recording.config.width = 2;
        assert!(replay_stats(&record).is_err());
    }
}
