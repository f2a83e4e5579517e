//! Title bar with backend chips, and the backend status panel.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::ui::theme;
use crate::workflow::WorkflowState;

/// Chip labels and colors: API reachability, then Jira auth and AI readiness
/// once the backend configuration is known.
pub fn header_chips(state: &WorkflowState) -> Vec<(&'static str, Color)> {
    let mut chips = vec![if state.api_reachable() {
        ("API Connected", Color::Green)
    } else {
        ("API Disconnected", Color::Red)
    }];

    if let Some(config) = state.config() {
        let auth = config.authentication_ready;
        chips.push((
            if auth { "Auth Ready" } else { "Auth Not Ready" },
            theme::readiness_color(auth),
        ));
        let ai = config.gemini_api_configured;
        chips.push((
            if ai { "AI Ready" } else { "AI Not Ready" },
            theme::readiness_color(ai),
        ));
    }
    chips
}

/// Render the one-line title bar.
pub fn render_header(frame: &mut Frame, area: Rect, state: &WorkflowState) {
    let mut spans = vec![Span::styled(
        " Jira Test Case Generator ",
        Style::default()
            .fg(theme::HIGHLIGHT)
            .add_modifier(Modifier::BOLD),
    )];
    for (label, color) in header_chips(state) {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!("[{}]", label), Style::default().fg(color)));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme::MUTED)),
    );
    frame.render_widget(header, area);
}

/// Render backend details and the readiness warning.
pub fn render_status_panel(frame: &mut Frame, area: Rect, state: &WorkflowState, base_url: &str) {
    let label = theme::label_style();
    let mut lines = vec![Line::from(vec![
        Span::styled("Backend  ", label),
        Span::raw(base_url.to_string()),
    ])];

    match state.config() {
        Some(config) => {
            let not_configured = || "Not configured".to_string();
            lines.push(Line::from(vec![
                Span::styled("Jira     ", label),
                Span::raw(config.jira_base_url.clone().unwrap_or_else(not_configured)),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Project  ", label),
                Span::raw(
                    config
                        .default_project_key
                        .clone()
                        .unwrap_or_else(not_configured),
                ),
            ]));
            if let Some(warning) = config.readiness_warning() {
                lines.push(Line::styled(
                    warning,
                    Style::default().fg(Color::Yellow),
                ));
            }
        }
        None => lines.push(Line::styled(
            "Backend configuration not loaded (Ctrl+R to retry)",
            Style::default().fg(theme::MUTED),
        )),
    }

    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .title(" Backend ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::MUTED)),
        );
    frame.render_widget(panel, area);
}
