use std::time::Duration;

use crossterm::event::Event as CrosstermEvent;

#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// A tick is due; carries the time elapsed since the previous one.
    Tick(Duration),
    Render,
    Crossterm(CrosstermEvent),
}
