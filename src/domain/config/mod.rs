//! Configuration domain module

mod app_config;

pub use app_config::{
    AccessibilityConfig, AppConfig, HotkeyConfig, TraversalLimits, DEFAULT_ENDPOINT,
    DEFAULT_MAX_DEPTH, DEFAULT_MAX_ITEMS, DEFAULT_TIMEOUT_SECS,
};
