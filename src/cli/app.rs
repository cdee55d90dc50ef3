//! Main app runner for one-shot mode

use std::env;
use std::io::{self, IsTerminal, Read};
use std::process::ExitCode;

use crate::application::ports::{Clipboard, ConfigStore, RawResponse, Scorer};
use crate::application::PresentationRouter;
use crate::domain::capture::CaptureResult;
use crate::domain::config::AppConfig;
use crate::domain::scoring::ScoreOutcome;
use crate::infrastructure::{ArboardClipboard, HttpScoringClient, XdgConfigStore};

use super::args::ScoreOptions;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment variable overriding the scoring endpoint
pub const ENDPOINT_ENV: &str = "PROMPT_LENS_ENDPOINT";

/// Source name shown for text passed on the command line
const CLI_SOURCE: &str = "command line";

/// Run a single scoring request
pub async fn run_oneshot(options: ScoreOptions) -> ExitCode {
    let mut presenter = Presenter::new();

    let text = match options.text {
        Some(text) => text,
        None => match read_stdin() {
            Ok(text) => text,
            Err(e) => {
                presenter.error(&format!("Failed to read stdin: {}", e));
                return ExitCode::from(EXIT_ERROR);
            }
        },
    };

    let capture = CaptureResult::new(&text, CLI_SOURCE);
    if capture.is_empty() {
        presenter.warn("Nothing to score. Pass text as an argument or pipe it on stdin.");
        return ExitCode::from(EXIT_USAGE_ERROR);
    }

    let scorer = HttpScoringClient::with_timeout(&options.endpoint, options.timeout);

    presenter.start_spinner("Scoring...");
    let body = match scorer.score(capture.text()).await {
        RawResponse::Body(body) => {
            presenter.spinner_success("Scored");
            body
        }
        RawResponse::ConnectionFailed(reason) => {
            presenter.spinner_fail("Scoring failed");
            presenter.error(&format!(
                "Could not reach the scoring service at {}: {}",
                options.endpoint, reason
            ));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let outcome = ScoreOutcome::from_body(&body);
    let summary = PresentationRouter::summary(&capture, &outcome);

    if let Some(result) = outcome.structured() {
        eprintln!("{}", presenter.format_score(result.overall));
    }

    if options.details {
        presenter.surface(&PresentationRouter::details(&summary));
    } else {
        presenter.surface(&summary);
    }

    match &summary.payload.enhanced_text {
        Some(enhanced) => {
            presenter.output(enhanced);

            if options.copy {
                match ArboardClipboard::new().copy(enhanced).await {
                    Ok(()) => presenter.info("Copied enhanced prompt to clipboard"),
                    Err(e) => presenter.warn(&e.to_string()),
                }
            }
        }
        None => {
            if options.copy {
                presenter.info("No enhanced prompt to copy");
            }
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}

fn read_stdin() -> io::Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(String::new());
    }

    let mut text = String::new();
    stdin.lock().read_to_string(&mut text)?;
    Ok(text)
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load_or_empty().await;

    let env_config = AppConfig {
        endpoint: env::var(ENDPOINT_ENV).ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}
