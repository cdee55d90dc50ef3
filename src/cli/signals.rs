//! Signal handling for daemon mode

use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::{mpsc, oneshot};

use crate::domain::display_mode::DisplayMode;
use crate::domain::hotkey::HotkeyCommand;

/// Commands delivered to the daemon loop
#[derive(Debug)]
pub enum DaemonSignal {
    /// Score the focused text
    Analyze,
    /// Write the stored enhancement back
    Replace,
    /// Switch between notifications and alerts, reporting the new mode if asked
    ToggleDisplayMode(Option<oneshot::Sender<DisplayMode>>),
    /// Shutdown daemon (SIGINT/SIGTERM)
    Shutdown,
}

impl From<HotkeyCommand> for DaemonSignal {
    fn from(command: HotkeyCommand) -> Self {
        match command {
            HotkeyCommand::Analyze => Self::Analyze,
            HotkeyCommand::Replace => Self::Replace,
        }
    }
}

/// Daemon signal handler
///
/// Handles OS shutdown signals (SIGINT/SIGTERM) and provides a channel
/// for receiving daemon commands from other sources (hotkeys, socket server).
pub struct DaemonSignalHandler {
    receiver: mpsc::Receiver<DaemonSignal>,
}

impl DaemonSignalHandler {
    /// Create a new daemon signal handler and start listening for shutdown signals.
    ///
    /// Returns the handler and a sender that other sources use to reach the
    /// daemon loop.
    pub async fn new() -> Result<(Self, mpsc::Sender<DaemonSignal>), std::io::Error> {
        let (tx, rx) = mpsc::channel(10);

        let tx_int = tx.clone();
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::spawn(async move {
            sigint.recv().await;
            tracing::info!("received SIGINT");
            let _ = tx_int.send(DaemonSignal::Shutdown).await;
        });

        let tx_term = tx.clone();
        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::spawn(async move {
            sigterm.recv().await;
            tracing::info!("received SIGTERM");
            let _ = tx_term.send(DaemonSignal::Shutdown).await;
        });

        Ok((Self { receiver: rx }, tx))
    }

    /// Wait for the next signal
    pub async fn recv(&mut self) -> Option<DaemonSignal> {
        self.receiver.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hotkey_commands_map_to_signals() {
        assert!(matches!(
            DaemonSignal::from(HotkeyCommand::Analyze),
            DaemonSignal::Analyze
        ));
        assert!(matches!(
            DaemonSignal::from(HotkeyCommand::Replace),
            DaemonSignal::Replace
        ));
    }

    #[tokio::test]
    async fn sender_reaches_handler() {
        let (mut handler, tx) = DaemonSignalHandler::new().await.unwrap();
        tx.send(DaemonSignal::ToggleDisplayMode(None)).await.unwrap();
        assert!(matches!(
            handler.recv().await,
            Some(DaemonSignal::ToggleDisplayMode(None))
        ));
    }
}
