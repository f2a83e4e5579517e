//! Generated test suite: a case list with the selected case's details.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::api::types::{TestCase, TestSuite};
use crate::ui::theme;

/// Selection state for the test case list.
#[derive(Debug, Default)]
pub struct TestCasesView {
    selected: usize,
    list_state: ListState,
}

impl TestCasesView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the selected case.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Move the selection down, stopping at the last of `len` cases.
    pub fn select_next(&mut self, len: usize) {
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Back to the first case, for a freshly generated suite.
    pub fn reset(&mut self) {
        self.selected = 0;
        self.list_state = ListState::default();
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, suite: &TestSuite) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);

        let items: Vec<ListItem> = suite
            .test_cases
            .iter()
            .map(|case| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<7}", case.test_case_id),
                        Style::default().fg(theme::MUTED),
                    ),
                    Span::raw(case.title.clone()),
                ]))
            })
            .collect();

        let title = format!(
            " {} ({} test cases) ",
            suite.suite_name, suite.total_test_cases
        );
        let list = List::new(items)
            .block(Block::default().title(title).borders(Borders::ALL))
            .highlight_style(
                Style::default()
                    .fg(theme::HIGHLIGHT)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let selected = self.selected.min(suite.test_cases.len().saturating_sub(1));
        self.list_state
            .select((!suite.test_cases.is_empty()).then_some(selected));
        frame.render_stateful_widget(list, chunks[0], &mut self.list_state);

        let detail = match suite.test_cases.get(selected) {
            Some(case) => case_lines(case),
            None => vec![Line::styled(
                "The backend returned no test cases.",
                Style::default().fg(theme::MUTED),
            )],
        };
        let detail = Paragraph::new(detail)
            .wrap(Wrap { trim: false })
            .block(Block::default().title(" Details ").borders(Borders::ALL));
        frame.render_widget(detail, chunks[1]);
    }
}

fn heading(text: &'static str) -> Line<'static> {
    Line::styled(text, theme::label_style())
}

fn case_lines(case: &TestCase) -> Vec<Line<'static>> {
    let mut badges = vec![
        Span::styled(
            format!("[{}]", case.priority),
            Style::default().fg(theme::test_priority_color(case.priority)),
        ),
        Span::raw(" "),
        Span::styled(
            format!("[{}]", case.test_type),
            Style::default().fg(theme::test_type_color(case.test_type)),
        ),
    ];
    if let Some(duration) = &case.estimated_duration {
        badges.push(Span::styled(
            format!("  ~{}", duration),
            Style::default().fg(theme::MUTED),
        ));
    }

    let mut lines = vec![
        Line::styled(
            format!("{}: {}", case.test_case_id, case.title),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::from(badges),
    ];
    if !case.description.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::raw(case.description.clone()));
    }

    if !case.preconditions.is_empty() {
        lines.push(Line::raw(""));
        lines.push(heading("Preconditions"));
        lines.extend(
            case.preconditions
                .iter()
                .map(|p| Line::raw(format!("  • {}", p))),
        );
    }

    if !case.test_steps.is_empty() {
        lines.push(Line::raw(""));
        lines.push(heading("Steps"));
        for step in &case.test_steps {
            lines.push(Line::raw(format!(
                "  {}. {}",
                step.step_number, step.step_description
            )));
            lines.push(Line::styled(
                format!("     Expected: {}", step.expected_result),
                Style::default().fg(theme::MUTED),
            ));
        }
    }

    if let Some(data) = case.test_data.as_ref().filter(|d| !d.is_empty()) {
        lines.push(Line::raw(""));
        lines.push(heading("Test Data"));
        if let Some(input) = &data.input_data {
            lines.push(Line::raw(format!("  Input: {}", input)));
        }
        if let Some(expected) = &data.expected_output {
            lines.push(Line::raw(format!("  Expected Output: {}", expected)));
        }
    }
    lines
}
