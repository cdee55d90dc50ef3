//! Focused text bridge port interfaces
//!
//! Two layers: `AccessibilityBackend`/`FocusedElement` are the narrow,
//! synchronous capabilities a host platform provides; `TextBridge` is the
//! asynchronous read/replace interface the coordinator talks to.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::capture::{CaptureResult, TextRange};

/// Focused text bridge errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error("Accessibility permission has not been granted")]
    PermissionDenied,

    #[error("The frontmost application has no focused element")]
    NoFocusedElement,

    #[error("No text is selected")]
    NoText,

    #[error("Could not write to the focused element: {0}")]
    ReplaceFailed(String),

    #[error("Accessibility bridge unavailable: {0}")]
    Unavailable(String),
}

/// Which write strategy succeeded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceStrategy {
    /// The selection attribute was set directly
    SelectionAttribute,
    /// The selection range was spliced into the full value
    SplicedValue,
    /// The whole value was overwritten
    WholeValue,
}

impl ReplaceStrategy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SelectionAttribute => "selection",
            Self::SplicedValue => "spliced value",
            Self::WholeValue => "whole value",
        }
    }
}

/// Error when the host rejects an attribute write
#[derive(Debug, Clone, Error)]
#[error("{attribute} write rejected: {reason}")]
pub struct AttributeWriteError {
    pub attribute: &'static str,
    pub reason: String,
}

/// The UI element currently holding keyboard focus
pub trait FocusedElement {
    /// Name of the application owning the element
    fn app_name(&self) -> String;

    /// Selected text, if the element reports one
    fn selected_text(&self) -> Option<String>;

    /// Full value, if the element reports one
    fn value(&self) -> Option<String>;

    /// Selection range in UTF-16 code units
    fn selected_range(&self) -> Option<TextRange>;

    fn set_selected_text(&self, text: &str) -> Result<(), AttributeWriteError>;

    fn set_value(&self, text: &str) -> Result<(), AttributeWriteError>;
}

/// Host accessibility layer.
///
/// Calls are synchronous foreign calls and must run off the async runtime's
/// worker threads.
pub trait AccessibilityBackend: Send + Sync {
    type Element: FocusedElement;

    /// Whether this process is authorized to use the accessibility layer
    fn is_trusted(&self) -> bool;

    /// The element holding focus in the frontmost application
    fn focused_element(&self) -> Option<Self::Element>;
}

/// Port for reading and replacing the focused text
#[async_trait]
pub trait TextBridge: Send + Sync {
    /// Read the selection (or value) of the focused element
    async fn capture_focused_text(&self) -> Result<CaptureResult, BridgeError>;

    /// Write `new_text` into the focused element, least destructive first
    async fn replace_focused_text(&self, new_text: &str) -> Result<ReplaceStrategy, BridgeError>;
}

#[async_trait]
impl TextBridge for Box<dyn TextBridge> {
    async fn capture_focused_text(&self) -> Result<CaptureResult, BridgeError> {
        self.as_ref().capture_focused_text().await
    }

    async fn replace_focused_text(&self, new_text: &str) -> Result<ReplaceStrategy, BridgeError> {
        self.as_ref().replace_focused_text(new_text).await
    }
}
