//! Polls crossterm and converts terminal events into application events.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEventKind};

use super::Event;

/// Tick interval; also bounds how long API results wait before being applied.
const TICK_RATE_MS: u64 = 100;

/// Blocking event source for the UI loop.
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler with the default tick rate.
    pub fn new() -> Self {
        Self::with_tick_rate(TICK_RATE_MS)
    }

    /// Create a new event handler with a custom tick rate.
    pub fn with_tick_rate(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Wait up to one tick for the next event.
    ///
    /// Returns `Event::Tick` when nothing arrived in time.
    pub fn next(&self) -> std::io::Result<Event> {
        if !event::poll(self.tick_rate)? {
            return Ok(Event::Tick);
        }
        Ok(convert(event::read()?))
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn convert(event: CrosstermEvent) -> Event {
    match event {
        // Windows reports releases too; only presses and repeats edit text.
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Release => Event::Tick,
        CrosstermEvent::Key(key) => Event::Key(key),
        CrosstermEvent::Paste(text) => Event::Paste(text),
        CrosstermEvent::Resize(width, height) => Event::Resize(width, height),
        CrosstermEvent::Mouse(_) | CrosstermEvent::FocusGained | CrosstermEvent::FocusLost => {
            Event::Tick
        }
    }
}
