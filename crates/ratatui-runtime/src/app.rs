use std::time::Duration;

use crossterm::event::Event;
use ratatui::Frame;

use crate::Runtime;

/// An application driven by [`Runtime::run`].
pub trait App {
    /// Called once before the loop starts. Configure tick and render rates here.
    fn init(&mut self, runtime: &mut Runtime);

    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, resize, etc.).
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    fn draw(&self, frame: &mut Frame);

    /// Advances the application by `dt`, the wall-clock time since the previous tick.
    fn update(&mut self, runtime: &mut Runtime, dt: Duration);
}
