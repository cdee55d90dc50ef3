//! Captured text value object

/// Text captured from the focused element of the frontmost application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CaptureResult {
    text: String,
    source_app_name: String,
}

impl CaptureResult {
    /// Create a capture result. The text is trimmed on creation.
    pub fn new(text: impl AsRef<str>, source_app_name: impl Into<String>) -> Self {
        Self {
            text: text.as_ref().trim().to_string(),
            source_app_name: source_app_name.into(),
        }
    }

    /// Captured text (trimmed)
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Name of the application the text came from
    pub fn source_app_name(&self) -> &str {
        &self.source_app_name
    }

    /// True when nothing was selected
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
