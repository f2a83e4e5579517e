//! Main application state and event loop glue.
//!
//! This module implements The Elm Architecture (TEA) pattern for the TUI:
//! `update` folds terminal events into the model, `poll_messages` folds
//! background API results in, and `view` is a pure function of both. The
//! workflow itself lives in `WorkflowController`; the app only owns what is
//! purely presentational (text fields, focus, toasts, list selection).

use std::path::PathBuf;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

use crate::api::ApiClient;
use crate::events::Event;
use crate::export;
use crate::tasks::{ApiMessage, TaskSpawner};
use crate::ui::{
    render_header, render_issue, render_status_panel, theme, LoadingIndicator, TestCasesView,
    TextInput, Toast, ToastKind,
};
use crate::validator::validation_hint;
use crate::workflow::{Action, WorkflowController, WorkflowState};

/// Which text field receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Url,
    Token,
}

/// The main application struct that holds all state.
pub struct App {
    controller: WorkflowController,
    /// Results from background API tasks.
    receiver: mpsc::UnboundedReceiver<ApiMessage>,
    url_input: TextInput,
    token_input: TextInput,
    /// Whether the custom Jira token field is shown and used.
    show_token: bool,
    focus: Focus,
    test_cases: TestCasesView,
    loading: LoadingIndicator,
    /// Mirrors the workflow's error/success message.
    toast: Option<Toast>,
    /// App-local notices (export results).
    notice: Option<Toast>,
    /// Where Ctrl+S writes exported suites.
    export_dir: PathBuf,
    should_quit: bool,
}

impl App {
    /// Create the app for `client`. Exports go to `export_dir`.
    pub fn new(client: ApiClient, export_dir: PathBuf) -> Self {
        debug!("Creating new application instance");
        let (spawner, receiver) = TaskSpawner::channel();

        Self {
            controller: WorkflowController::new(client, spawner),
            receiver,
            url_input: TextInput::new()
                .with_placeholder("https://company.atlassian.net/browse/PROJECT-123"),
            token_input: TextInput::masked().with_placeholder("Custom Jira API token"),
            show_token: false,
            focus: Focus::Url,
            test_cases: TestCasesView::new(),
            loading: LoadingIndicator::new(),
            toast: None,
            notice: None,
            export_dir,
            should_quit: false,
        }
    }

    /// Fire the startup checks. Requires a running tokio runtime.
    pub fn start(&self) {
        self.controller.start();
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The workflow state being displayed.
    pub fn state(&self) -> &WorkflowState {
        self.controller.state()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn url(&self) -> &str {
        self.url_input.value()
    }

    pub fn is_token_shown(&self) -> bool {
        self.show_token
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn notice(&self) -> Option<&Toast> {
        self.notice.as_ref()
    }

    pub fn selected_test_case(&self) -> usize {
        self.test_cases.selected()
    }

    /// Whether Parse/Generate would be dispatched right now.
    pub fn can_submit(&self) -> bool {
        self.state().can_dispatch(self.url_input.value())
    }

    /// Apply every API result that has arrived, without blocking.
    pub fn poll_messages(&mut self) {
        while let Ok(message) = self.receiver.try_recv() {
            self.handle_api_message(message);
        }
    }

    /// Apply one API result.
    pub fn handle_api_message(&mut self, message: ApiMessage) {
        trace!(?message, "API message");
        let new_suite = matches!(message, ApiMessage::TestCasesGenerated(Ok(_)));
        self.controller.handle_message(message);
        if new_suite {
            self.test_cases.reset();
        }
        self.sync(Instant::now());
    }

    /// Update the application state based on an event.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Quit => {
                info!("Quit event received");
                self.should_quit = true;
            }
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event);
            }
            Event::Paste(text) => self.focused_input().insert_str(&text),
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => self.handle_tick(Instant::now()),
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            (KeyCode::Esc, _) => self.dismiss(),
            (KeyCode::Tab, _) | (KeyCode::BackTab, _) => {
                if self.show_token {
                    self.focus = match self.focus {
                        Focus::Url => Focus::Token,
                        Focus::Token => Focus::Url,
                    };
                }
            }
            (KeyCode::Char('p'), KeyModifiers::CONTROL) | (KeyCode::Enter, _) => {
                self.submit(Action::Parse)
            }
            (KeyCode::Char('g'), KeyModifiers::CONTROL) => self.submit(Action::Generate),
            (KeyCode::Char('t'), KeyModifiers::CONTROL) => self.toggle_token(),
            (KeyCode::Char('r'), KeyModifiers::CONTROL) => self.controller.refresh_config(),
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => self.export(),
            (KeyCode::Up, _) => self.test_cases.select_previous(),
            (KeyCode::Down, _) => {
                let len = self
                    .state()
                    .test_suite()
                    .map_or(0, |suite| suite.test_cases.len());
                self.test_cases.select_next(len);
            }
            _ => {
                self.focused_input().handle_input(key);
            }
        }
    }

    fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            Focus::Url => &mut self.url_input,
            Focus::Token => &mut self.token_input,
        }
    }

    /// Show or hide the custom token field. Hiding forgets the token.
    fn toggle_token(&mut self) {
        self.show_token = !self.show_token;
        if self.show_token {
            self.focus = Focus::Token;
        } else {
            self.token_input.clear();
            self.focus = Focus::Url;
        }
        debug!(show_token = self.show_token, "Toggled custom token field");
    }

    fn submit(&mut self, action: Action) {
        if !self.can_submit() {
            debug!(?action, loading = self.state().is_loading(), "Submit ignored");
            return;
        }

        let url = self.url_input.value().to_string();
        match action {
            Action::Parse => {
                let token = if self.show_token {
                    Some(self.token_input.value())
                } else {
                    None
                };
                self.controller.begin_parse(&url, token);
            }
            Action::Generate => self.controller.begin_generate(&url),
        }
        self.sync(Instant::now());
    }

    fn export(&mut self) {
        let now = Instant::now();
        let Some(suite) = self.controller.state().test_suite() else {
            self.notice = Some(Toast::new("No test cases to export yet", ToastKind::Info, now));
            return;
        };

        self.notice = Some(match export::write_test_suite(&self.export_dir, suite) {
            Ok(path) => Toast::new(
                format!("Exported to {}", path.display()),
                ToastKind::Info,
                now,
            ),
            Err(e) => {
                warn!(error = %e, "Export failed");
                Toast::new(e.user_message(), ToastKind::Error, now)
            }
        });
    }

    fn dismiss(&mut self) {
        self.controller.dismiss_messages();
        self.toast = None;
        self.notice = None;
    }

    /// Advance animations and expire toasts as of `now`.
    pub fn handle_tick(&mut self, now: Instant) {
        self.loading.tick();

        if self.toast.as_ref().is_some_and(|t| t.is_expired_at(now)) {
            self.controller.dismiss_messages();
            self.toast = None;
        }
        if self.notice.as_ref().is_some_and(|t| t.is_expired_at(now)) {
            self.notice = None;
        }
    }

    /// Bring the spinner and the toast in line with the workflow state.
    fn sync(&mut self, now: Instant) {
        let state = self.controller.state();

        match state.pending_action() {
            Some(action) if !self.loading.is_active() => {
                self.loading.start(action.progress_message())
            }
            None => self.loading.stop(),
            _ => {}
        }

        let wanted = state
            .error()
            .map(|m| (ToastKind::Error, m))
            .or_else(|| state.success().map(|m| (ToastKind::Success, m)));
        match wanted {
            Some((kind, message)) => {
                if !self.toast.as_ref().is_some_and(|t| t.shows(kind, message)) {
                    self.toast = Some(Toast::new(message, kind, now));
                }
            }
            None => self.toast = None,
        }
    }

    /// Render the application UI.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let token_height = if self.show_token { 3 } else { 0 };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),            // Header
                Constraint::Length(5),            // Backend panel
                Constraint::Length(3),            // URL
                Constraint::Length(token_height), // Token
                Constraint::Length(1),            // Spinner
                Constraint::Min(1),               // Issue / test cases
                Constraint::Length(1),            // Key help
            ])
            .split(area);

        let state = self.controller.state();
        render_header(frame, chunks[0], state);
        render_status_panel(frame, chunks[1], state, self.controller.client().base_url());

        self.url_input.render(
            frame,
            chunks[2],
            "Jira Issue URL",
            self.focus == Focus::Url,
            validation_hint(self.url_input.value()),
        );
        if self.show_token {
            self.token_input.render(
                frame,
                chunks[3],
                "Custom Jira Token",
                self.focus == Focus::Token,
                None,
            );
        }
        self.loading.render(frame, chunks[4]);

        self.render_content(frame, chunks[5]);
        self.render_footer(frame, chunks[6]);

        let mut offset = 1;
        if let Some(toast) = &self.toast {
            offset += toast.render(frame, area, offset);
        }
        if let Some(notice) = &self.notice {
            notice.render(frame, area, offset);
        }
    }

    fn render_content(&mut self, frame: &mut Frame, area: Rect) {
        let state = self.controller.state();
        match state.test_suite() {
            Some(suite) => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
                    .split(area);
                render_issue(frame, chunks[0], state.issue());
                self.test_cases.render(frame, chunks[1], suite);
            }
            None => render_issue(frame, area, state.issue()),
        }
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Black).bg(Color::Cyan));
        let desc = |d: &'static str| Span::styled(d, Style::default().fg(theme::MUTED));
        let enabled = self.can_submit();
        let action = |d: &'static str| {
            Span::styled(
                d,
                Style::default().fg(if enabled { Color::White } else { theme::MUTED }),
            )
        };

        let footer = Line::from(vec![
            key(" ^P "),
            action(" parse  "),
            key(" ^G "),
            action(" generate  "),
            key(" ^T "),
            desc(" token  "),
            key(" ^R "),
            desc(" refresh  "),
            key(" ^S "),
            desc(" export  "),
            key(" Esc "),
            desc(" dismiss  "),
            key(" ^C "),
            desc(" quit"),
        ]);
        frame.render_widget(Paragraph::new(footer), area);
    }
}
