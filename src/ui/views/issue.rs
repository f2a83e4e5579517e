//! Issue metadata panel.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::api::types::IssueData;
use crate::ui::theme;

fn field<'a>(label: &'static str, value: impl Into<String>, style: Style) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<10}", label), theme::label_style()),
        Span::styled(value.into(), style),
    ])
}

fn issue_lines(issue: &IssueData) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::styled(
            issue.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        field(
            "Status",
            issue.status.clone(),
            Style::default().fg(theme::issue_status_color(&issue.status)),
        ),
        field(
            "Priority",
            issue.priority.clone(),
            Style::default().fg(theme::issue_priority_color(&issue.priority)),
        ),
    ];
    if let Some(issue_type) = &issue.issue_type {
        lines.push(field("Type", issue_type.clone(), Style::default()));
    }
    lines.push(field("Assignee", issue.assignee_name(), Style::default()));
    lines.push(field("Reporter", issue.reporter.clone(), Style::default()));
    if let Some(created) = issue.created_date() {
        lines.push(field("Created", created, Style::default()));
    }
    if let Some(updated) = issue.updated_date() {
        lines.push(field("Updated", updated, Style::default()));
    }
    if let Some(description) = &issue.description {
        lines.push(Line::raw(""));
        lines.extend(description.lines().map(|l| Line::raw(l.to_string())));
    }
    lines
}

/// Render the active issue, or a prompt when there is none.
pub fn render_issue(frame: &mut Frame, area: Rect, issue: Option<&IssueData>) {
    let lines = match issue {
        Some(issue) => issue_lines(issue),
        None => vec![Line::styled(
            "Enter a Jira issue URL, then Ctrl+P to parse or Ctrl+G to generate test cases.",
            Style::default().fg(theme::MUTED),
        )],
    };

    let panel = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" Issue ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::MUTED)),
    );
    frame.render_widget(panel, area);
}
