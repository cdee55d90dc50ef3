//! Host accessibility backends

#[cfg(target_os = "macos")]
mod macos;

#[cfg(not(target_os = "macos"))]
mod keystroke;

#[cfg(target_os = "macos")]
pub use macos::MacAccessibility;

#[cfg(not(target_os = "macos"))]
pub use keystroke::KeystrokeAccessibility;

use crate::application::ports::TextBridge;
use crate::application::FocusedTextBridge;
use crate::domain::config::TraversalLimits;

/// Create the text bridge for the current platform
#[cfg(target_os = "macos")]
pub fn create_text_bridge(limits: TraversalLimits) -> Box<dyn TextBridge> {
    Box::new(FocusedTextBridge::new(MacAccessibility::new(limits)))
}

/// Create the text bridge for the current platform
#[cfg(not(target_os = "macos"))]
pub fn create_text_bridge(limits: TraversalLimits) -> Box<dyn TextBridge> {
    tracing::debug!(?limits, "element search not used with keystroke backend");
    Box::new(FocusedTextBridge::new(KeystrokeAccessibility::new()))
}
