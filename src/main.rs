//! jiracase binary: the terminal UI by default, one-shot commands otherwise.

use std::io::{self, Stdout};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{error, info};

use jiracase::api::ApiClient;
use jiracase::app::App;
use jiracase::cli::{self, Cli, Command};
use jiracase::events::EventHandler;
use jiracase::{logging, AppError};

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("warning: logging disabled: {:#}", e);
    }
    info!(version = env!("CARGO_PKG_VERSION"), "Starting jiracase");

    let code = match run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "Exiting with error");
            eprintln!("error: {}", e.user_message());
            e.exit_code()
        }
    };

    logging::shutdown();
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

async fn run(cli: &Cli) -> jiracase::Result<i32> {
    let config = cli.load_config()?;
    let client = ApiClient::from_settings(&config.backend)?;

    match cli.command() {
        Command::Tui => {
            run_tui(client).map_err(|e| AppError::terminal(format!("{:#}", e)))?;
            Ok(0)
        }
        command => cli::run(command, client).await,
    }
}

fn run_tui(client: ApiClient) -> anyhow::Result<()> {
    let export_dir = std::env::current_dir().context("current directory is unavailable")?;

    // Restore the terminal before the panic message is printed.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, client, export_dir);
    restore_terminal()?;
    terminal.show_cursor()?;
    result
}

fn setup_terminal() -> anyhow::Result<Tui> {
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal() -> anyhow::Result<()> {
    terminal::disable_raw_mode()?;
    execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen)?;
    Ok(())
}

fn event_loop(
    terminal: &mut Tui,
    client: ApiClient,
    export_dir: std::path::PathBuf,
) -> anyhow::Result<()> {
    let mut app = App::new(client, export_dir);
    let events = EventHandler::new();
    app.start();

    while !app.should_quit() {
        terminal.draw(|frame| app.view(frame))?;
        // Polling blocks this worker for at most one tick; requests run on
        // the other runtime threads.
        let event = tokio::task::block_in_place(|| events.next())?;
        app.update(event);
        app.poll_messages();
    }

    info!("Quitting");
    Ok(())
}
