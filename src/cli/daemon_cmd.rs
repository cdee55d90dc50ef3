//! Daemon command handler - sends commands to running daemon via IPC

use super::args::DaemonAction;
use super::ipc::create_ipc_client;
use super::presenter::Presenter;

/// Wire command for a daemon action
pub const fn wire_command(action: DaemonAction) -> &'static str {
    match action {
        DaemonAction::Analyze => "analyze",
        DaemonAction::Replace => "replace",
        DaemonAction::ToggleMode => "toggle-mode",
        DaemonAction::Status => "status",
    }
}

/// Handle daemon subcommand
pub async fn handle_daemon_command(
    action: DaemonAction,
    presenter: &Presenter,
) -> Result<(), String> {
    let client = create_ipc_client();

    if !client.is_daemon_running() {
        return Err("No daemon running. Start with: prompt-lens --daemon".to_string());
    }

    let cmd = wire_command(action);

    let response = client
        .send_command(cmd)
        .await
        .map_err(|e| format!("Failed to communicate with daemon: {}", e))?;

    let response = response.trim();

    if let Some(stripped) = response.strip_prefix("error:") {
        return Err(stripped.trim().to_string());
    }

    match action {
        DaemonAction::Status => {
            presenter.info(&format!("Daemon status: {}", response));
        }
        DaemonAction::ToggleMode => {
            let mode = response.strip_prefix("ok mode=").unwrap_or(response);
            presenter.info(&format!("Display mode: {}", mode));
        }
        _ => {
            presenter.info(&format!("Command sent: {}", cmd));
        }
    }

    Ok(())
}
