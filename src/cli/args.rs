//! CLI argument definitions using Clap

use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::config::TraversalLimits;
use crate::domain::DisplayMode;

/// PromptLens - score and improve prompts from any application
#[derive(Parser, Debug)]
#[command(name = "prompt-lens")]
#[command(version)]
#[command(about = "Score the selected text with a prompt scoring service and replace it with an improved version")]
#[command(long_about = None)]
pub struct Cli {
    /// Text to score once (reads stdin when omitted)
    #[arg(value_name = "TEXT", conflicts_with = "daemon")]
    pub text: Option<String>,

    /// Scoring service base URL
    #[arg(short = 'e', long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(short = 't', long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Show every sub-score and the full improved prompt
    #[arg(long, conflicts_with = "daemon")]
    pub details: bool,

    /// Copy the improved prompt to the clipboard
    #[arg(short = 'c', long, conflicts_with = "daemon")]
    pub copy: bool,

    /// Run as daemon with global hotkeys (control via: prompt-lens daemon analyze/replace/status)
    #[arg(long)]
    pub daemon: bool,

    /// How results are shown in daemon mode
    #[arg(short = 'm', long, value_name = "MODE", requires = "daemon")]
    pub mode: Option<ModeArg>,

    /// Config and daemon subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Send commands to running daemon
    Daemon {
        #[command(subcommand)]
        action: DaemonAction,
    },
}

/// Daemon control actions
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaemonAction {
    /// Capture and score the focused text (same as the analyze hotkey)
    Analyze,
    /// Replace the focused text with the last enhancement (same as the replace hotkey)
    Replace,
    /// Switch between notification and alert display
    ToggleMode,
    /// Show daemon status
    Status,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Display mode argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Notification,
    Alert,
}

impl From<ModeArg> for DisplayMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Notification => DisplayMode::Notification,
            ModeArg::Alert => DisplayMode::Alert,
        }
    }
}

/// Parsed one-shot options
#[derive(Debug, Clone)]
pub struct ScoreOptions {
    pub text: Option<String>,
    pub endpoint: String,
    pub timeout: Duration,
    pub details: bool,
    pub copy: bool,
}

/// Parsed daemon options
#[derive(Debug, Clone)]
pub struct DaemonOptions {
    pub endpoint: String,
    pub timeout: Duration,
    pub display_mode: DisplayMode,
    pub enhancement_ttl: Duration,
    pub analyze_hotkey: String,
    pub replace_hotkey: String,
    pub traversal_limits: TraversalLimits,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "endpoint",
    "timeout_secs",
    "display_mode",
    "enhancement_ttl_secs",
    "hotkeys.analyze",
    "hotkeys.replace",
    "accessibility.max_items",
    "accessibility.max_depth",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
