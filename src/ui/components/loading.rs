//! Spinner shown while a backend request is in flight.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

/// Spinner animation frames.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// A loading indicator with an animated spinner.
#[derive(Debug, Clone, Default)]
pub struct LoadingIndicator {
    message: String,
    frame: usize,
    active: bool,
}

impl LoadingIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start spinning with `message`, restarting the animation.
    pub fn start(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.frame = 0;
        self.active = true;
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Advance the animation by one frame. Called on every tick.
    pub fn tick(&mut self) {
        if self.active {
            self.frame = (self.frame + 1) % SPINNER_FRAMES.len();
        }
    }

    /// Spinner and message, or an empty string when idle.
    pub fn text(&self) -> String {
        if self.active {
            format!("{} {}", SPINNER_FRAMES[self.frame], self.message)
        } else {
            String::new()
        }
    }

    /// Render centered in `area`. Draws nothing when idle.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.active {
            return;
        }
        let paragraph = Paragraph::new(self.text())
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_has_no_text() {
        let loading = LoadingIndicator::new();
        assert!(!loading.is_active());
        assert_eq!(loading.text(), "");
    }

    #[test]
    fn test_tick_wraps_around() {
        let mut loading = LoadingIndicator::new();
        loading.start("Generating test cases...");
        for _ in 0..SPINNER_FRAMES.len() {
            loading.tick();
        }
        assert_eq!(loading.text(), "⠋ Generating test cases...");
    }

    #[test]
    fn test_tick_is_frozen_when_stopped() {
        let mut loading = LoadingIndicator::new();
        loading.start("Parsing Jira issue...");
        loading.stop();
        loading.tick();
        assert_eq!(loading.frame, 0);
        assert_eq!(loading.message(), "Parsing Jira issue...");
    }
}
