//! Unix Domain Socket communication for daemon control

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::{mpsc, oneshot};

use super::{parse_request, IpcClient, IpcRequest, IpcServer, StateFn};
use crate::cli::signals::DaemonSignal;

const SOCKET_NAME: &str = "prompt-lens.sock";

/// Socket path resolver
#[derive(Debug, Clone)]
pub struct SocketPath {
    path: PathBuf,
}

impl SocketPath {
    /// Create socket path, preferring XDG_RUNTIME_DIR
    pub fn new() -> Self {
        let path = std::env::var("XDG_RUNTIME_DIR")
            .map(|dir| PathBuf::from(dir).join(SOCKET_NAME))
            .unwrap_or_else(|_| std::env::temp_dir().join(SOCKET_NAME));
        Self { path }
    }

    /// Create with custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the socket path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if socket file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Remove socket file if it exists
    pub fn cleanup(&self) -> io::Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

impl Default for SocketPath {
    fn default() -> Self {
        Self::new()
    }
}

/// Unix Domain Socket server for daemon commands
pub struct UnixSocketServer {
    socket_path: SocketPath,
    listener: Option<UnixListener>,
}

impl UnixSocketServer {
    pub fn new(socket_path: SocketPath) -> Self {
        Self {
            socket_path,
            listener: None,
        }
    }
}

impl Drop for UnixSocketServer {
    fn drop(&mut self) {
        self.cleanup();
    }
}

#[async_trait]
impl IpcServer for UnixSocketServer {
    fn bind(&mut self) -> io::Result<()> {
        // Stale socket from a crashed daemon
        self.socket_path.cleanup()?;

        let listener = UnixListener::bind(self.socket_path.path())?;
        self.listener = Some(listener);
        Ok(())
    }

    fn path(&self) -> String {
        self.socket_path.path().to_string_lossy().to_string()
    }

    async fn run(&self, tx: mpsc::Sender<DaemonSignal>, state_fn: StateFn) -> io::Result<()> {
        let listener = self
            .listener
            .as_ref()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "Socket not bound"))?;

        loop {
            match listener.accept().await {
                Ok((stream, _addr)) => {
                    let tx = tx.clone();
                    let state_fn = Arc::clone(&state_fn);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, tx, state_fn).await {
                            tracing::warn!(error = %e, "socket connection error");
                        }
                    });
                }
                Err(e) => {
                    tracing::warn!(error = %e, "socket accept error");
                }
            }
        }
    }

    fn cleanup(&self) {
        let _ = self.socket_path.cleanup();
    }
}

const SHUTTING_DOWN: &str = "error: daemon is shutting down\n";

async fn forward(tx: &mpsc::Sender<DaemonSignal>, signal: DaemonSignal) -> String {
    match tx.send(signal).await {
        Ok(()) => "ok\n".to_string(),
        Err(_) => SHUTTING_DOWN.to_string(),
    }
}

/// Build the reply for one request line
async fn respond(line: &str, tx: &mpsc::Sender<DaemonSignal>, state_fn: &StateFn) -> String {
    match parse_request(line) {
        Some(IpcRequest::Analyze) => forward(tx, DaemonSignal::Analyze).await,
        Some(IpcRequest::Replace) => forward(tx, DaemonSignal::Replace).await,
        Some(IpcRequest::ToggleDisplayMode) => {
            let (reply_tx, reply_rx) = oneshot::channel();
            if tx
                .send(DaemonSignal::ToggleDisplayMode(Some(reply_tx)))
                .await
                .is_err()
            {
                return SHUTTING_DOWN.to_string();
            }
            match reply_rx.await {
                Ok(mode) => format!("ok mode={}\n", mode),
                Err(_) => SHUTTING_DOWN.to_string(),
            }
        }
        Some(IpcRequest::Status) => format!("{}\n", state_fn().to_line()),
        None => "error: unknown command\n".to_string(),
    }
}

/// Handle a single client connection
async fn handle_connection(
    stream: UnixStream,
    tx: mpsc::Sender<DaemonSignal>,
    state_fn: StateFn,
) -> io::Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    reader.read_line(&mut line).await?;
    let response = respond(&line, &tx, &state_fn).await;

    writer.write_all(response.as_bytes()).await?;
    writer.flush().await?;

    Ok(())
}

/// Unix Domain Socket client for sending commands to daemon
pub struct UnixSocketClient {
    socket_path: SocketPath,
}

impl UnixSocketClient {
    pub fn new(socket_path: SocketPath) -> Self {
        Self { socket_path }
    }
}

#[async_trait]
impl IpcClient for UnixSocketClient {
    fn is_daemon_running(&self) -> bool {
        self.socket_path.exists()
    }

    async fn send_command(&self, cmd: &str) -> io::Result<String> {
        let stream = UnixStream::connect(self.socket_path.path()).await?;
        let (reader, mut writer) = stream.into_split();

        writer.write_all(format!("{}\n", cmd).as_bytes()).await?;
        writer.flush().await?;

        let mut reader = BufReader::new(reader);
        let mut response = String::new();
        reader.read_line(&mut response).await?;

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ipc::DaemonStatus;
    use crate::domain::coordinator::CoordinatorState;
    use crate::domain::display_mode::DisplayMode;

    fn idle() -> DaemonStatus {
        DaemonStatus {
            state: CoordinatorState::Idle,
            display_mode: DisplayMode::Notification,
        }
    }

    fn idle_fn() -> StateFn {
        Arc::new(idle)
    }

    #[test]
    fn socket_path_uses_xdg_runtime_dir() {
        let path = std::env::var("XDG_RUNTIME_DIR")
            .map(|dir| PathBuf::from(dir).join("prompt-lens.sock"))
            .unwrap_or_else(|_| std::env::temp_dir().join("prompt-lens.sock"));

        let socket_path = SocketPath::new();
        assert_eq!(socket_path.path(), path.as_path());
    }

    #[tokio::test]
    async fn signal_commands_are_forwarded() {
        let (tx, mut rx) = mpsc::channel(4);
        assert_eq!(respond("replace\n", &tx, &idle_fn()).await, "ok\n");
        assert!(matches!(rx.recv().await, Some(DaemonSignal::Replace)));
    }

    #[tokio::test]
    async fn toggle_reports_mode_applied_by_daemon() {
        let (tx, mut rx) = mpsc::channel(4);
        let daemon = tokio::spawn(async move {
            // Two toggles in a row must report two different modes
            let mut mode = DisplayMode::Notification;
            while let Some(DaemonSignal::ToggleDisplayMode(Some(reply))) = rx.recv().await {
                mode = mode.toggled();
                let _ = reply.send(mode);
            }
        });

        let state_fn = idle_fn();
        assert_eq!(
            respond("toggle-mode\n", &tx, &state_fn).await,
            "ok mode=alert\n"
        );
        assert_eq!(
            respond("toggle-mode\n", &tx, &state_fn).await,
            "ok mode=notification\n"
        );

        drop(tx);
        daemon.await.unwrap();
    }

    #[tokio::test]
    async fn toggle_without_reply_is_an_error() {
        let (tx, mut rx) = mpsc::channel(4);
        tokio::spawn(async move {
            // Dropping the reply sender, as a daemon that is stopping would
            let _ = rx.recv().await;
        });
        assert_eq!(
            respond("toggle-mode\n", &tx, &idle_fn()).await,
            "error: daemon is shutting down\n"
        );
    }

    #[tokio::test]
    async fn unknown_command_is_an_error() {
        let (tx, _rx) = mpsc::channel(4);
        assert_eq!(
            respond("record\n", &tx, &idle_fn()).await,
            "error: unknown command\n"
        );
    }

    #[tokio::test]
    async fn client_and_server_talk_over_socket() {
        let dir = tempfile::tempdir().unwrap();
        let socket_path = SocketPath::with_path(dir.path().join("test.sock"));

        let mut server = UnixSocketServer::new(socket_path.clone());
        server.bind().unwrap();

        let (tx, mut rx) = mpsc::channel(4);
        tokio::spawn(async move {
            let _ = server.run(tx, idle_fn()).await;
        });

        let client = UnixSocketClient::new(socket_path);
        assert!(client.is_daemon_running());
        assert_eq!(
            client.send_command("status").await.unwrap(),
            "idle mode=notification\n"
        );
        assert_eq!(client.send_command("analyze").await.unwrap(), "ok\n");
        assert!(matches!(rx.recv().await, Some(DaemonSignal::Analyze)));
    }
}
