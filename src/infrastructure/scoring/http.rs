//! HTTP scoring service adapter

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::application::ports::{RawResponse, Scorer};
use crate::domain::config::DEFAULT_TIMEOUT_SECS;

/// Path appended to the configured endpoint
const SCORE_PATH: &str = "/score";

/// Longest diagnostic kept from an error body
const MAX_DIAGNOSTIC_CHARS: usize = 200;

#[derive(Debug, Serialize)]
struct ScoreRequest<'a> {
    text: &'a str,
}

/// Scoring service client
pub struct HttpScoringClient {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpScoringClient {
    /// Create a client for the given base URL with the default timeout
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with a custom request timeout
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "falling back to a client without timeout");
                reqwest::Client::new()
            });

        Self {
            endpoint: endpoint.into(),
            client,
        }
    }

    /// Build the request URL
    fn score_url(&self) -> String {
        format!("{}{}", self.endpoint.trim_end_matches('/'), SCORE_PATH)
    }

    fn diagnostic(error: &reqwest::Error) -> String {
        if error.is_timeout() {
            "request timed out".to_string()
        } else if error.is_connect() {
            "connection refused".to_string()
        } else {
            error.to_string()
        }
    }
}

fn shorten(text: &str) -> String {
    let text = text.trim();
    if text.chars().count() <= MAX_DIAGNOSTIC_CHARS {
        return text.to_string();
    }
    let mut short: String = text.chars().take(MAX_DIAGNOSTIC_CHARS).collect();
    short.push('…');
    short
}

#[async_trait]
impl Scorer for HttpScoringClient {
    async fn score(&self, text: &str) -> RawResponse {
        let url = self.score_url();
        tracing::debug!(url = %url, "sending scoring request");

        let response = match self
            .client
            .post(&url)
            .json(&ScoreRequest { text })
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return RawResponse::ConnectionFailed(Self::diagnostic(&e)),
        };

        let status = response.status();

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return RawResponse::ConnectionFailed(Self::diagnostic(&e)),
        };

        if !status.is_success() {
            let detail = shorten(&body);
            return RawResponse::ConnectionFailed(if detail.is_empty() {
                format!("HTTP {}", status)
            } else {
                format!("HTTP {}: {}", status, detail)
            });
        }

        if body.trim().is_empty() {
            return RawResponse::ConnectionFailed("empty response".to_string());
        }

        RawResponse::Body(body)
    }
}
