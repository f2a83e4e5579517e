//! Terminal events for the UI loop.

mod handler;

use crossterm::event::KeyEvent;

pub use handler::EventHandler;

/// Events consumed by `App::update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key press.
    Key(KeyEvent),
    /// Bracketed paste, delivered as one piece of text.
    Paste(String),
    /// Terminal resized to (width, height).
    Resize(u16, u16),
    /// No input within the tick interval.
    Tick,
    /// Request to leave the application.
    Quit,
}
