use std::{ops::Deref, time::Duration};

use blockfall_engine::{
    Command, ConfigError, GameConfig, GameSeed, GameSession, Recorder, SessionRecording,
};
use crossterm::event::Event;
use log::info;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};
use ratatui_runtime::{App, Runtime};

use crate::ui::widgets::{KeyBindingDisplay, SessionDisplay};

use super::input::{self, Action, KEY_BINDINGS};

/// The session being played, recorded only when the recording will be saved.
#[derive(Debug)]
enum PlaySession {
    Plain(GameSession),
    Recorded(Recorder),
}

impl Deref for PlaySession {
    type Target = GameSession;

    fn deref(&self) -> &Self::Target {
        match self {
            PlaySession::Plain(session) => session,
            PlaySession::Recorded(recorder) => &**recorder,
        }
    }
}

impl PlaySession {
    fn tick(&mut self, dt: Duration) {
        match self {
            PlaySession::Plain(session) => session.tick(dt),
            PlaySession::Recorded(recorder) => recorder.tick(dt),
        }
    }

    fn apply(&mut self, command: Command) {
        match self {
            PlaySession::Plain(session) => session.apply(command),
            PlaySession::Recorded(recorder) => recorder.apply(command),
        }
    }
}

#[derive(Debug)]
pub struct PlayApp {
    session: PlaySession,
    fps: f64,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(
        config: GameConfig,
        seed: GameSeed,
        fps: f64,
        random_blocks: bool,
        record: bool,
    ) -> Result<Self, ConfigError> {
        let mut session = if record {
            PlaySession::Recorded(Recorder::new(config, seed)?)
        } else {
            PlaySession::Plain(GameSession::with_config(config, seed)?)
        };
        if random_blocks {
            session.apply(Command::ToggleRandomBlocks);
        }
        info!("starting session with seed {seed}");
        Ok(Self {
            session,
            fps,
            is_exiting: false,
        })
    }

    /// Returns the recording (if recording was enabled) and the final session.
    pub fn into_parts(self) -> (Option<SessionRecording>, GameSession) {
        match self.session {
            PlaySession::Plain(session) => (None, session),
            PlaySession::Recorded(recorder) => {
                let (recording, session) = recorder.into_parts();
                (Some(recording), session)
            }
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_frame_rate(self.fps);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        let Some(key) = event.as_key_press_event() else {
            return;
        };
        match input::action_for_key(key) {
            Some(Action::Game(command)) => self.session.apply(command),
            Some(Action::Quit) => self.is_exiting = true,
            None => {}
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let snapshot = self.session.snapshot();
        let session_display = SessionDisplay::new(&snapshot);
        let help = KeyBindingDisplay::new(KEY_BINDINGS);

        let [main_area, help_area] = Layout::vertical([
            Constraint::Length(session_display.height()),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        frame.render_widget(&session_display, main_area);
        frame.render_widget(help, help_area);
    }

    fn update(&mut self, _runtime: &mut Runtime, dt: Duration) {
        self.session.tick(dt);
    }
}
