//! PromptLens CLI entry point

use std::process::ExitCode;

use clap::Parser;

use prompt_lens::cli::{
    app::{load_merged_config, run_oneshot, EXIT_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    daemon_app::run_daemon,
    daemon_cmd::handle_daemon_command,
    presenter::Presenter,
    DaemonOptions, ScoreOptions,
};
use prompt_lens::domain::config::AppConfig;
use prompt_lens::domain::DisplayMode;
use prompt_lens::infrastructure::XdgConfigStore;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    // Daemon mode keeps the main thread for the hotkey event loop
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            presenter.error(&format!("Failed to start async runtime: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    // Handle subcommands
    match cli.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = runtime.block_on(handle_config_command(action, &store, &presenter)) {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(Commands::Daemon { action }) => {
            if let Err(e) = runtime.block_on(handle_daemon_command(action, &presenter)) {
                presenter.error(&e);
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        None => {}
    }

    // Build CLI config from args
    let cli_config = AppConfig {
        endpoint: cli.endpoint.clone(),
        timeout_secs: cli.timeout,
        display_mode: cli.mode.map(|m| DisplayMode::from(m).to_string()),
        ..AppConfig::empty()
    };

    // Merge config
    let config = runtime.block_on(load_merged_config(cli_config));

    if cli.daemon {
        let options = DaemonOptions {
            endpoint: config.endpoint_or_default().to_string(),
            timeout: config.timeout_or_default(),
            display_mode: config.display_mode_or_default(),
            enhancement_ttl: config.enhancement_ttl_or_default(),
            analyze_hotkey: config.analyze_hotkey_or_default().to_string(),
            replace_hotkey: config.replace_hotkey_or_default().to_string(),
            traversal_limits: config.traversal_limits_or_default(),
        };

        run_daemon(&runtime, options)
    } else {
        let options = ScoreOptions {
            text: cli.text,
            endpoint: config.endpoint_or_default().to_string(),
            timeout: config.timeout_or_default(),
            details: cli.details,
            copy: cli.copy,
        };

        runtime.block_on(run_oneshot(options))
    }
}
