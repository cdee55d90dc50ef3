//! Daemon app runner
//!
//! The main thread owns the global hotkey registration and services the
//! platform event loop; everything else runs on the tokio runtime.

use std::process::ExitCode;
use std::sync::Arc;

use tokio::runtime::Runtime;

use crate::application::ports::{Clipboard, NoOpStatusIndicator, TextBridge};
use crate::application::{
    ui_channel, AnalysisCoordinator, CoordinatorContext, PresentationWorker, PromptStateStore,
    UiHandle,
};
use crate::domain::hotkey::HotkeyCommand;
use crate::infrastructure::{
    create_alert_renderer, create_clipboard, create_notification_renderer, create_text_bridge,
    HotkeyDispatcher, HttpScoringClient,
};

use super::app::{EXIT_ERROR, EXIT_SUCCESS};
use super::args::DaemonOptions;
use super::event_loop::pump_until;
use super::ipc::{create_ipc_server, DaemonStatus, IpcServer};
use super::logging::init_logging;
use super::pid_file::{PidFile, PidFileError};
use super::presenter::Presenter;
use super::signals::{DaemonSignal, DaemonSignalHandler};

/// Surfaces waiting for the presentation worker
const UI_QUEUE_CAPACITY: usize = 16;

type DaemonCoordinator = AnalysisCoordinator<
    Box<dyn TextBridge>,
    HttpScoringClient,
    Box<dyn Clipboard>,
    UiHandle,
    NoOpStatusIndicator,
>;

/// Run daemon mode
pub fn run_daemon(runtime: &Runtime, options: DaemonOptions) -> ExitCode {
    let presenter = Presenter::new();
    init_logging();

    let pid_file = PidFile::new();
    if let Err(e) = pid_file.acquire() {
        match e {
            PidFileError::AlreadyRunning(pid) => {
                presenter.error(&format!("Another daemon is already running (PID: {})", pid));
            }
            _ => {
                presenter.error(&e.to_string());
            }
        }
        return ExitCode::from(EXIT_ERROR);
    }

    let _runtime_guard = runtime.enter();

    let (signals, signal_tx) = match runtime.block_on(DaemonSignalHandler::new()) {
        Ok(s) => s,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    // Must happen on the main thread
    let bindings = [
        (HotkeyCommand::Analyze, options.analyze_hotkey.as_str()),
        (HotkeyCommand::Replace, options.replace_hotkey.as_str()),
    ];
    let dispatcher = match HotkeyDispatcher::register(&bindings, signal_tx.clone()) {
        Ok(dispatcher) => {
            if dispatcher.map().is_empty() {
                presenter.warn("No hotkeys could be registered; use `prompt-lens daemon analyze`");
            }
            Some(dispatcher)
        }
        Err(e) => {
            presenter.warn(&format!("Global hotkeys unavailable: {}", e));
            None
        }
    };

    let context = CoordinatorContext::new(
        PromptStateStore::with_ttl(options.enhancement_ttl),
        options.display_mode,
    );

    let (ui, ui_rx) = ui_channel(UI_QUEUE_CAPACITY);
    let worker = PresentationWorker::new(
        create_notification_renderer(),
        create_alert_renderer(),
        create_clipboard(),
        context.display_mode.clone(),
    );
    runtime.spawn(worker.run(ui_rx));

    let coordinator: Arc<DaemonCoordinator> = Arc::new(AnalysisCoordinator::new(
        create_text_bridge(options.traversal_limits),
        HttpScoringClient::with_timeout(options.endpoint.as_str(), options.timeout),
        create_clipboard(),
        ui,
        NoOpStatusIndicator,
        context,
    ));

    let mut server = create_ipc_server();
    if let Err(e) = server.bind() {
        presenter.error(&format!("Failed to bind socket: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }
    let server: Arc<dyn IpcServer> = Arc::from(server);

    let server_task = Arc::clone(&server);
    let status_source = Arc::clone(&coordinator);
    runtime.spawn(async move {
        let state_fn = Arc::new(move || DaemonStatus {
            state: status_source.state(),
            display_mode: status_source.context().display_mode.get(),
        });
        if let Err(e) = server_task.run(signal_tx, state_fn).await {
            tracing::error!(error = %e, "socket server stopped");
        }
    });

    presenter.daemon_status("Started, waiting for commands...");
    presenter.info(&format!(
        "PID: {} | Socket: {} | Endpoint: {} | Mode: {}",
        std::process::id(),
        server.path(),
        options.endpoint,
        options.display_mode
    ));
    presenter.info(&format!(
        "Analyze: {} | Replace: {} | SIGINT: exit",
        options.analyze_hotkey, options.replace_hotkey
    ));

    let daemon = runtime.spawn(daemon_loop(Arc::clone(&coordinator), signals));
    pump_until(|| daemon.is_finished());

    let clean = runtime.block_on(daemon).unwrap_or(false);

    drop(dispatcher);
    server.cleanup();
    drop(pid_file);

    if clean {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

async fn daemon_loop(coordinator: Arc<DaemonCoordinator>, mut signals: DaemonSignalHandler) -> bool {
    let presenter = Presenter::new();

    loop {
        match signals.recv().await {
            Some(DaemonSignal::Analyze) => dispatch(&coordinator, HotkeyCommand::Analyze),
            Some(DaemonSignal::Replace) => dispatch(&coordinator, HotkeyCommand::Replace),
            Some(DaemonSignal::ToggleDisplayMode(reply)) => {
                let mode = coordinator.toggle_display_mode().await;
                presenter.daemon_status(&format!("Display mode: {}", mode));
                if let Some(reply) = reply {
                    let _ = reply.send(mode);
                }
            }
            Some(DaemonSignal::Shutdown) => {
                presenter.daemon_status("Shutting down...");
                return true;
            }
            None => {
                // Channel closed
                return false;
            }
        }
    }
}

fn dispatch(coordinator: &Arc<DaemonCoordinator>, command: HotkeyCommand) {
    if coordinator.dispatch(command) {
        tracing::info!(command = %command, "command started");
    } else {
        tracing::info!(command = %command, state = %coordinator.state(), "busy, command dropped");
    }
}
