//! System clipboard adapter using arboard

use async_trait::async_trait;

use crate::application::ports::{Clipboard, ClipboardError};

/// System clipboard adapter.
///
/// A fresh handle is opened per copy; the clipboard is overwritten, never appended.
#[derive(Debug, Default)]
pub struct ArboardClipboard;

impl ArboardClipboard {
    pub fn new() -> Self {
        Self
    }
}

/// Write `text` to the clipboard on the current thread
pub(crate) fn write_text(text: &str) -> Result<(), ClipboardError> {
    let mut clipboard = arboard::Clipboard::new()
        .map_err(|e| ClipboardError::ClipboardUnavailable(e.to_string()))?;

    clipboard
        .set_text(text)
        .map_err(|e| ClipboardError::CopyFailed(e.to_string()))
}

#[async_trait]
impl Clipboard for ArboardClipboard {
    async fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        let text = text.to_owned();

        // arboard operations are blocking
        tokio::task::spawn_blocking(move || write_text(&text))
            .await
            .map_err(|e| ClipboardError::CopyFailed(format!("Task join error: {}", e)))??;

        tracing::debug!("copied text to clipboard");
        Ok(())
    }
}
