//! Clipboard port interface

use async_trait::async_trait;
use thiserror::Error;

/// Clipboard errors
#[derive(Debug, Clone, Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    #[error("Failed to copy to clipboard: {0}")]
    CopyFailed(String),
}

/// Port for clipboard operations
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Replace the system clipboard contents with `text`.
    async fn copy(&self, text: &str) -> Result<(), ClipboardError>;
}

#[async_trait]
impl Clipboard for Box<dyn Clipboard> {
    async fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        self.as_ref().copy(text).await
    }
}
