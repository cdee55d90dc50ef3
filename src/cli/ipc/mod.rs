//! IPC (Inter-Process Communication) module for daemon control
//!
//! The daemon listens on a Unix Domain Socket; one line in, one line out.

mod unix_socket;

pub use unix_socket::{SocketPath, UnixSocketClient, UnixSocketServer};

use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;

use super::signals::DaemonSignal;
use crate::domain::coordinator::CoordinatorState;
use crate::domain::display_mode::DisplayMode;

/// Snapshot reported by the `status` command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaemonStatus {
    pub state: CoordinatorState,
    pub display_mode: DisplayMode,
}

impl DaemonStatus {
    /// Single-line wire form, e.g. `idle mode=notification`
    pub fn to_line(&self) -> String {
        format!("{} mode={}", self.state.as_str(), self.display_mode.as_str())
    }
}

/// State function type for IPC servers, read when a status request arrives
pub type StateFn = Arc<dyn Fn() -> DaemonStatus + Send + Sync>;

/// A request read from a client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpcRequest {
    Analyze,
    Replace,
    ToggleDisplayMode,
    Status,
}

/// Parse one command line from a client
pub fn parse_request(line: &str) -> Option<IpcRequest> {
    match line.trim() {
        "analyze" => Some(IpcRequest::Analyze),
        "replace" => Some(IpcRequest::Replace),
        "toggle-mode" => Some(IpcRequest::ToggleDisplayMode),
        "status" => Some(IpcRequest::Status),
        _ => None,
    }
}

/// Trait for IPC servers that listen for daemon commands
#[async_trait::async_trait]
pub trait IpcServer: Send + Sync {
    /// Bind to the IPC endpoint
    fn bind(&mut self) -> io::Result<()>;

    /// Get the path/name of the IPC endpoint
    fn path(&self) -> String;

    /// Accept and handle connections
    ///
    /// Each command is forwarded to `tx`; `state_fn` answers status queries.
    async fn run(&self, tx: mpsc::Sender<DaemonSignal>, state_fn: StateFn) -> io::Result<()>;

    /// Cleanup IPC resources
    fn cleanup(&self);
}

/// Trait for IPC clients that send commands to the daemon
#[async_trait::async_trait]
pub trait IpcClient: Send + Sync {
    /// Check if daemon appears to be running (endpoint exists)
    fn is_daemon_running(&self) -> bool;

    /// Send a command and receive response
    async fn send_command(&self, cmd: &str) -> io::Result<String>;
}

/// Create the IPC server
pub fn create_ipc_server() -> Box<dyn IpcServer> {
    Box::new(UnixSocketServer::new(SocketPath::new()))
}

/// Create the IPC client
pub fn create_ipc_client() -> Box<dyn IpcClient> {
    Box::new(UnixSocketClient::new(SocketPath::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_commands() {
        assert_eq!(parse_request("analyze\n"), Some(IpcRequest::Analyze));
        assert_eq!(parse_request("replace"), Some(IpcRequest::Replace));
        assert_eq!(
            parse_request(" toggle-mode "),
            Some(IpcRequest::ToggleDisplayMode)
        );
        assert_eq!(parse_request("status"), Some(IpcRequest::Status));
    }

    #[test]
    fn shutdown_is_not_remote() {
        assert_eq!(parse_request("shutdown"), None);
        assert_eq!(parse_request(""), None);
    }

    #[test]
    fn status_line() {
        let status = DaemonStatus {
            state: CoordinatorState::Scoring,
            display_mode: DisplayMode::Alert,
        };
        assert_eq!(status.to_line(), "scoring mode=alert");
    }
}
