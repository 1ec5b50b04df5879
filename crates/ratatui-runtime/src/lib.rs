//! Minimal terminal game loop on top of `ratatui` and `crossterm`.
//!
//! [`Runtime`] owns the loop and drives an [`App`]: it measures the real time
//! between ticks and passes it to [`App::update`], forwards terminal events to
//! [`App::handle_event`], and redraws through [`App::draw`].

pub use self::{app::App, event_loop::RenderMode, runtime::Runtime};

mod app;
mod event;
mod event_loop;
mod runtime;
