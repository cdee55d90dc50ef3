//! Scoring service port interface

use async_trait::async_trait;

/// Outcome of a single scoring request.
///
/// A request always resolves to one of these; transport problems are folded
/// into `ConnectionFailed` so the caller can present every outcome uniformly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawResponse {
    /// The service answered with a non-empty body
    Body(String),
    /// Connection failure, non-success status, timeout or empty body
    ConnectionFailed(String),
}

impl RawResponse {
    /// Text to interpret as the scoring payload
    pub fn text(&self) -> &str {
        match self {
            Self::Body(body) => body,
            Self::ConnectionFailed(reason) => reason,
        }
    }

    pub fn is_connection_failure(&self) -> bool {
        matches!(self, Self::ConnectionFailed(_))
    }
}

/// Port for the remote scoring service
#[async_trait]
pub trait Scorer: Send + Sync {
    /// Send text to the scoring service.
    ///
    /// Issues exactly one request; never retries.
    async fn score(&self, text: &str) -> RawResponse;
}
