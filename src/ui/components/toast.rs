//! Auto-dismissing outcome toasts.

use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// How long an error stays on screen.
pub const ERROR_TOAST_DURATION: Duration = Duration::from_secs(6);

/// How long a success message stays on screen.
pub const SUCCESS_TOAST_DURATION: Duration = Duration::from_secs(4);

/// The kind of toast, which determines its look and lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    /// Local notices such as export results.
    Info,
}

impl ToastKind {
    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "✓",
            ToastKind::Error => "✗",
            ToastKind::Info => "ℹ",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            ToastKind::Success => Color::Green,
            ToastKind::Error => Color::Red,
            ToastKind::Info => Color::Blue,
        }
    }

    /// Time on screen before the toast expires.
    pub fn duration(&self) -> Duration {
        match self {
            ToastKind::Error => ERROR_TOAST_DURATION,
            ToastKind::Success | ToastKind::Info => SUCCESS_TOAST_DURATION,
        }
    }
}

/// A single toast message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    shown_at: Instant,
}

impl Toast {
    /// Create a toast shown from `now`.
    pub fn new(message: impl Into<String>, kind: ToastKind, now: Instant) -> Self {
        Self {
            message: message.into(),
            kind,
            shown_at: now,
        }
    }

    /// Whether the toast has outlived its kind's duration at `now`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.kind.duration()
    }

    /// Same kind and text, regardless of when it was shown.
    pub fn shows(&self, kind: ToastKind, message: &str) -> bool {
        self.kind == kind && self.message == message
    }

    /// Render in the bottom-right corner of `area`, `offset` rows above the
    /// bottom edge. Returns the height used.
    pub fn render(&self, frame: &mut Frame, area: Rect, offset: u16) -> u16 {
        let width = 50.min(area.width.saturating_sub(4));
        let inner_width = width.saturating_sub(4).max(1) as usize;
        let text_len = self.message.chars().count() + 2;
        let height = (((text_len + inner_width - 1) / inner_width) as u16 + 2)
            .min(area.height.saturating_sub(offset + 1));
        if height < 3 {
            return 0;
        }

        let x = area.x + area.width.saturating_sub(width + 2);
        let y = area.y + area.height.saturating_sub(height + offset + 1);
        let toast_area = Rect::new(x, y, width, height);

        let style = Style::default().fg(self.kind.color());
        let text = Line::from(vec![
            Span::styled(
                format!("{} ", self.kind.icon()),
                style.add_modifier(Modifier::BOLD),
            ),
            Span::styled(self.message.as_str(), style),
        ]);

        frame.render_widget(Clear, toast_area);
        frame.render_widget(
            Paragraph::new(text)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).border_style(style)),
            toast_area,
        );
        height
    }
}
