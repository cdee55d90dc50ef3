//! Domain error types

use thiserror::Error;

/// Error when an invalid display mode is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid display mode: \"{input}\". Valid modes are: notification, alert")]
pub struct InvalidDisplayModeError {
    pub input: String,
}

/// Error when the scoring service response cannot be decoded into a score
#[derive(Debug, Clone, Error)]
pub enum ScoreParseError {
    #[error("Response is empty")]
    Empty,

    #[error("Response is not a valid score document: {0}")]
    InvalidDocument(String),
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
