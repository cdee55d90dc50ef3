//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the host accessibility layer, the scoring service,
//! the clipboard and the desktop notification stack.

pub mod accessibility;
pub mod clipboard;
pub mod config;
pub mod hotkey;
pub mod scoring;
pub mod surface;

// Re-export adapters
pub use accessibility::create_text_bridge;
pub use clipboard::{create_clipboard, ArboardClipboard};
pub use config::XdgConfigStore;
pub use hotkey::{HotkeyDispatcher, HotkeyError};
pub use scoring::HttpScoringClient;
pub use surface::{
    create_alert_renderer, create_notification_renderer, DialogRenderer, NotificationRenderer,
};
