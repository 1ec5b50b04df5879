use std::{ops::Deref, time::Duration};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, GameConfig};

use super::{
    game_session::{Command, GameSession},
    piece_generator::GameSeed,
};

/// One input to a session, in the order it was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordedEvent {
    Tick { dt: Duration },
    Command(Command),
}

/// Everything needed to reproduce a session: its seed, rules, and inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecording {
    pub seed: GameSeed,
    pub config: GameConfig,
    pub events: Vec<RecordedEvent>,
}

impl SessionRecording {
    /// Rebuilds the session and re-applies every recorded event.
    pub fn replay(&self) -> Result<GameSession, ConfigError> {
        let mut session = GameSession::with_config(self.config.clone(), self.seed)?;
        for event in &self.events {
            match *event {
                RecordedEvent::Tick { dt } => session.tick(dt),
                RecordedEvent::Command(command) => session.apply(command),
            }
        }
        Ok(session)
    }
}

/// A [`GameSession`] that logs every tick and command it forwards.
///
/// Read access goes through `Deref`; mutation only through
/// [`tick`](Self::tick) and [`apply`](Self::apply), so nothing can change the
/// session behind the recording's back.
#[derive(Debug, Clone)]
pub struct Recorder {
    session: GameSession,
    recording: SessionRecording,
}

impl Deref for Recorder {
    type Target = GameSession;

    fn deref(&self) -> &Self::Target {
        &self.session
    }
}

impl Recorder {
    pub fn new(config: GameConfig, seed: GameSeed) -> Result<Self, ConfigError> {
        let session = GameSession::with_config(config.clone(), seed)?;
        Ok(Self {
            session,
            recording: SessionRecording {
                seed,
                config,
                events: vec![],
            },
        })
    }

    /// Advances the session, recording the tick only if it can change it.
    ///
    /// Ticks while paused or after game over are no-ops and are not stored.
    pub fn tick(&mut self, dt: Duration) {
        if self.session.session_state().is_playing() {
            self.recording.events.push(RecordedEvent::Tick { dt });
        }
        self.session.tick(dt);
    }

    pub fn apply(&mut self, command: Command) {
        self.recording.events.push(RecordedEvent::Command(command));
        self.session.apply(command);
    }

    #[must_use]
    pub fn recording(&self) -> &SessionRecording {
        &self.recording
    }

    /// Splits into the recording and the session it produced.
    #[must_use]
    pub fn into_parts(self) -> (SessionRecording, GameSession) {
        (self.recording, self.session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> GameSeed {
        "5eed5eed5eed5eed5eed5eed5eed5eed".parse().unwrap()
    }

    fn play(recorder: &mut Recorder) {
        let frame = Duration::from_millis(16);
        for i in 0..2000 {
            match i % 7 {
                0 => recorder.apply(Command::MoveLeft),
                2 => recorder.apply(Command::RotateClockwise),
                4 if i % 3 == 0 => recorder.apply(Command::HardDrop),
                5 => recorder.apply(Command::MoveRight),
                _ => {}
            }
            if i == 900 {
                recorder.apply(Command::ToggleRandomBlocks);
            }
            recorder.tick(frame);
        }
    }

    #[test]
    fn test_replay_reproduces_session() {
        let mut recorder = Recorder::new(GameConfig::default(), seed()).unwrap();
        play(&mut recorder);

        let replayed = recorder.recording().replay().unwrap();
        assert_eq!(replayed.snapshot(), recorder.snapshot());
        assert!(recorder.stats().completed_pieces() > 0);
    }

    #[test]
    fn test_replay_from_json() {
        let mut recorder = Recorder::new(GameConfig::default(), seed()).unwrap();
        play(&mut recorder);
        let expected = recorder.snapshot();

        let (recording, _) = recorder.into_parts();
        let json = serde_json::to_string(&recording).unwrap();
        let recording: SessionRecording = serde_json::from_str(&json).unwrap();
        assert_eq!(recording.replay().unwrap().snapshot(), expected);
    }

    #[test]
    fn test_idle_ticks_are_not_recorded() {
        let frame = Duration::from_millis(16);
        let mut recorder = Recorder::new(GameConfig::default(), seed()).unwrap();
        recorder.tick(frame);
        recorder.apply(Command::TogglePause);
        for _ in 0..36_000 {
            recorder.tick(frame);
        }
        recorder.apply(Command::TogglePause);
        recorder.tick(frame);
        assert_eq!(recorder.recording().events.len(), 4);

        let replayed = recorder.recording().replay().unwrap();
        assert_eq!(replayed.snapshot(), recorder.snapshot());
    }

    #[test]
    fn test_recorder_rejects_invalid_config() {
        let config = GameConfig {
            lines_per_level: 0,
            ..GameConfig::default()
        };
        assert!(matches!(
            Recorder::new(config, seed()),
            Err(ConfigError::ZeroLinesPerLevel)
        ));
    }
}
