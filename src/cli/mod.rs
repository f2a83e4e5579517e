//! Command line interface.
//!
//! Without a subcommand jiracase opens the terminal UI. The one-shot
//! subcommands drive the same workflow controller and print its outcome, which
//! makes them usable from scripts.

mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::export;
use crate::logging;
use crate::tasks::TaskSpawner;
use crate::validator::{is_valid_issue_url, INVALID_URL_HINT};
use crate::workflow::WorkflowController;

pub use output::{format_issue, format_probe, format_status, format_test_suite};

/// Top-level command line arguments.
#[derive(Parser, Debug)]
#[command(name = "jiracase")]
#[command(author, version)]
#[command(about = "Turn Jira issues into AI-generated test cases")]
pub struct Cli {
    /// Backend base URL (overrides config file and JIRACASE_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds (overrides config file and JIRACASE_TIMEOUT_SECS)
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Mirror log output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open the interactive terminal UI (default)
    Tui,

    /// Check backend reachability and configuration
    Status,

    /// Ask the backend to test its Jira credentials
    #[command(name = "test-jira")]
    TestJira,

    /// Check whether a URL is a Jira issue URL
    Validate {
        /// Candidate issue URL
        url: String,
    },

    /// Fetch and print a Jira issue
    Parse(ParseArgs),

    /// Generate test cases for a Jira issue
    Generate(GenerateArgs),
}

/// Arguments for `parse`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ParseArgs {
    /// Jira issue URL (https://company.atlassian.net/browse/PROJ-123)
    pub url: String,

    /// Use this Jira token instead of the backend's configured credentials
    #[arg(long, value_name = "TOKEN")]
    pub auth_token: Option<String>,

    /// Print the issue as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `generate`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct GenerateArgs {
    /// Jira issue URL (https://company.atlassian.net/browse/PROJ-123)
    pub url: String,

    /// Directory to export the test suite into as JSON
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Print the test suite as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// The subcommand to run; the UI when none was given.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Tui)
    }

    /// Load every configuration layer, apply these flags last and validate.
    pub fn load_config(&self) -> Result<Config> {
        self.finish_config(Config::load()?)
    }

    /// Apply the flags to `config` and validate the combined result.
    ///
    /// A bad file or environment value is fine as long as a flag replaces it.
    pub fn finish_config(&self, mut config: Config) -> Result<Config> {
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Apply flag overrides on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(url) = &self.api_url {
            config.backend.api_url = url.clone();
        }
        if let Some(secs) = self.timeout {
            config.backend.timeout_secs = secs;
        }
    }
}

/// Run a one-shot subcommand, returning the process exit code.
///
/// `Command::Tui` is handled by the binary and is not accepted here.
pub async fn run(command: Command, client: ApiClient) -> Result<i32> {
    debug!(?command, "Running command");
    match command {
        Command::Tui => Err(AppError::other("The terminal UI is not a one-shot command")),
        Command::Validate { url } => Ok(validate(&url)),
        Command::Status => status(client).await,
        Command::TestJira => test_jira(client).await,
        Command::Parse(args) => parse(client, args).await,
        Command::Generate(args) => generate(client, args).await,
    }
}

fn validate(url: &str) -> i32 {
    match crate::validator::issue_key(url) {
        Some(key) => {
            println!("valid: {}", key);
            0
        }
        None => {
            eprintln!("{}", INVALID_URL_HINT);
            1
        }
    }
}

fn controller(client: ApiClient) -> WorkflowController {
    let (spawner, _rx) = TaskSpawner::channel();
    WorkflowController::new(client, spawner)
}

async fn status(client: ApiClient) -> Result<i32> {
    let base_url = client.base_url().to_string();
    let mut controller = controller(client);
    controller.startup().await;

    let state = controller.state();
    let log_dir = logging::log_directory();
    println!("{}", format_status(state, &base_url, log_dir.as_deref()));
    Ok(if state.api_reachable() && state.error().is_none() {
        0
    } else {
        1
    })
}

async fn test_jira(client: ApiClient) -> Result<i32> {
    let controller = controller(client);
    let probe = controller.probe_jira().await?;
    println!("{}", format_probe(&probe));
    Ok(if probe.success { 0 } else { 1 })
}

async fn parse(client: ApiClient, args: ParseArgs) -> Result<i32> {
    ensure_issue_url(&args.url)?;

    let mut controller = controller(client);
    controller
        .parse_issue(&args.url, args.auth_token.as_deref())
        .await;

    let state = controller.state();
    if let Some(message) = state.error() {
        return Err(AppError::other(message));
    }
    let issue = state
        .issue()
        .ok_or_else(|| AppError::other("Backend returned no issue"))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(issue)?);
    } else {
        println!("{}", format_issue(issue));
    }
    Ok(0)
}

async fn generate(client: ApiClient, args: GenerateArgs) -> Result<i32> {
    ensure_issue_url(&args.url)?;

    let mut controller = controller(client);
    controller.generate_test_cases(&args.url).await;

    let state = controller.state();
    if let Some(message) = state.error() {
        return Err(AppError::other(message));
    }
    let (issue, suite) = state
        .issue()
        .zip(state.test_suite())
        .ok_or_else(|| AppError::other("Backend returned no test suite"))?;

    if args.json {
        println!("{}", export::to_json(suite)?);
    } else {
        println!("{}\n", format_issue(issue));
        println!("{}", format_test_suite(suite));
    }

    if let Some(dir) = &args.output {
        let path = export::write_test_suite(dir, suite)?;
        info!(path = %path.display(), "Wrote export");
        eprintln!("Exported to {}", path.display());
    }
    Ok(0)
}

fn ensure_issue_url(url: &str) -> Result<()> {
    if is_valid_issue_url(url) {
        Ok(())
    } else {
        Err(AppError::InvalidIssueUrl(url.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ISSUE_URL: &str = "https://acme.atlassian.net/browse/PROJ-42";

    #[test]
    fn test_no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["jiracase"]).unwrap();
        assert_eq!(cli.command(), Command::Tui);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "jiracase",
            "status",
            "--api-url",
            "http://10.0.0.5:9000",
            "--timeout",
            "30",
        ])
        .unwrap();
        assert_eq!(cli.command(), Command::Status);

        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.backend.api_url, "http://10.0.0.5:9000");
        assert_eq!(config.backend.timeout_secs, 30);
    }

    #[test]
    fn test_timeout_flag_replaces_bad_env_value() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let lookup = |key: &str| (key == crate::config::TIMEOUT_ENV).then(|| "0".to_string());

        let cli = Cli::try_parse_from(["jiracase", "status", "--timeout", "30"]).unwrap();
        let config = cli
            .finish_config(Config::load_with(&path, lookup).unwrap())
            .unwrap();
        assert_eq!(config.backend.timeout_secs, 30);

        let cli = Cli::try_parse_from(["jiracase", "status"]).unwrap();
        let err = cli
            .finish_config(Config::load_with(&path, lookup).unwrap())
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_parse_args() {
        let cli =
            Cli::try_parse_from(["jiracase", "parse", ISSUE_URL, "--auth-token", "tok", "--json"])
                .unwrap();
        assert_eq!(
            cli.command(),
            Command::Parse(ParseArgs {
                url: ISSUE_URL.to_string(),
                auth_token: Some("tok".to_string()),
                json: true,
            })
        );
    }

    #[test]
    fn test_generate_requires_url() {
        assert!(Cli::try_parse_from(["jiracase", "generate"]).is_err());
    }

    #[test]
    fn test_test_jira_name() {
        let cli = Cli::try_parse_from(["jiracase", "test-jira"]).unwrap();
        assert_eq!(cli.command(), Command::TestJira);
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let cli = Cli::try_parse_from(["jiracase"]).unwrap();
        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_validate_exit_codes() {
        assert_eq!(validate(ISSUE_URL), 0);
        assert_eq!(validate("https://acme.atlassian.net/browse/PROJ-42/"), 1);
    }

    #[tokio::test]
    async fn test_parse_rejects_bad_url_before_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = ApiClient::with_base_url(&server.uri()).unwrap();
        let args = ParseArgs {
            url: "not a url".to_string(),
            auth_token: None,
            json: false,
        };
        let err = parse(client, args).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidIssueUrl(_)));
    }

    #[tokio::test]
    async fn test_parse_reports_backend_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/parse"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"error": "issue not found"})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::with_base_url(&server.uri()).unwrap();
        let args = ParseArgs {
            url: ISSUE_URL.to_string(),
            auth_token: None,
            json: false,
        };
        let err = parse(client, args).await.unwrap_err();
        assert_eq!(err.user_message(), "issue not found");
    }

    #[tokio::test]
    async fn test_generate_writes_export() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate-test-cases"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "issue_key": "PROJ-42",
                "title": "Checkout",
                "test_cases": {
                    "test_suite": {
                        "suite_name": "Checkout",
                        "suite_description": "",
                        "total_test_cases": 0,
                        "test_cases": []
                    }
                }
            })))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let client = ApiClient::with_base_url(&server.uri()).unwrap();
        let args = GenerateArgs {
            url: ISSUE_URL.to_string(),
            output: Some(dir.path().to_path_buf()),
            json: true,
        };
        assert_eq!(generate(client, args).await.unwrap(), 0);
        assert!(dir.path().join("test_cases_Checkout.json").exists());
    }

    #[tokio::test]
    async fn test_status_exit_code_follows_reachability() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/config"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "auth_token_configured": true,
                "jira_email_configured": true,
                "authentication_ready": true,
                "gemini_api_configured": false
            })))
            .mount(&server)
            .await;

        let client = ApiClient::with_base_url(&server.uri()).unwrap();
        assert_eq!(status(client).await.unwrap(), 0);
    }
}
