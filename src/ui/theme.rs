//! Colors for status chips and badges.

use ratatui::style::{Color, Modifier, Style};

use crate::api::types::{TestPriority, TestType};

/// Accent used for selection and focused borders.
pub const HIGHLIGHT: Color = Color::Cyan;

/// Secondary text (labels, hints).
pub const MUTED: Color = Color::DarkGray;

/// Color for a Jira priority name (`Highest` ... `Lowest`).
pub fn issue_priority_color(priority: &str) -> Color {
    match priority.to_ascii_lowercase().as_str() {
        "highest" | "critical" => Color::Red,
        "high" => Color::Yellow,
        "medium" => Color::Blue,
        "low" | "lowest" => Color::Green,
        _ => Color::Gray,
    }
}

/// Color for a Jira workflow status name.
pub fn issue_status_color(status: &str) -> Color {
    match status.to_ascii_lowercase().as_str() {
        "done" | "closed" | "resolved" => Color::Green,
        "in progress" | "in review" => Color::Blue,
        "blocked" => Color::Red,
        _ => Color::Gray,
    }
}

pub fn test_priority_color(priority: TestPriority) -> Color {
    match priority {
        TestPriority::High => Color::Red,
        TestPriority::Medium => Color::Yellow,
        TestPriority::Low => Color::Green,
        TestPriority::Unset => Color::Gray,
    }
}

pub fn test_type_color(test_type: TestType) -> Color {
    match test_type {
        TestType::Functional => Color::Cyan,
        TestType::Performance => Color::Magenta,
        TestType::Security => Color::Red,
        TestType::Usability => Color::Blue,
        TestType::Integration => Color::Green,
        TestType::Unset => Color::Gray,
    }
}

/// Green when `ok`, yellow otherwise.
pub fn readiness_color(ok: bool) -> Color {
    if ok {
        Color::Green
    } else {
        Color::Yellow
    }
}

/// Bold label style for `key: value` rows.
pub fn label_style() -> Style {
    Style::default().fg(MUTED).add_modifier(Modifier::BOLD)
}
