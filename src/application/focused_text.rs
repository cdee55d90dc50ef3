//! Focused text bridge
//!
//! Extraction and replacement policy on top of a host accessibility backend.
//! Reads prefer the selection over the whole value; writes go from least to
//! most destructive: selection attribute, spliced value, whole value.

use std::sync::Arc;

use async_trait::async_trait;

use super::ports::{
    AccessibilityBackend, AttributeWriteError, BridgeError, FocusedElement, ReplaceStrategy,
    TextBridge,
};
use crate::domain::capture::{splice_utf16, CaptureResult};

/// Read the focused element's selection, or its value when nothing is selected
pub fn capture_from<B: AccessibilityBackend + ?Sized>(
    backend: &B,
) -> Result<CaptureResult, BridgeError> {
    if !backend.is_trusted() {
        return Err(BridgeError::PermissionDenied);
    }

    let element = backend
        .focused_element()
        .ok_or(BridgeError::NoFocusedElement)?;

    let text = non_blank(element.selected_text()).or_else(|| non_blank(element.value()));

    match text {
        Some(text) => Ok(CaptureResult::new(text, element.app_name())),
        None => Err(BridgeError::NoText),
    }
}

/// Replace the focused element's selection (or value) with `new_text`
pub fn replace_in<B: AccessibilityBackend + ?Sized>(
    backend: &B,
    new_text: &str,
) -> Result<ReplaceStrategy, BridgeError> {
    if !backend.is_trusted() {
        return Err(BridgeError::PermissionDenied);
    }

    let element = backend
        .focused_element()
        .ok_or(BridgeError::NoFocusedElement)?;

    if has_selection(&element) {
        match element.set_selected_text(new_text) {
            Ok(()) => return Ok(ReplaceStrategy::SelectionAttribute),
            Err(e) => tracing::debug!(error = %e, "selection write rejected, splicing value"),
        }

        match splice_into_value(&element, new_text) {
            Ok(()) => return Ok(ReplaceStrategy::SplicedValue),
            Err(e) => tracing::debug!(error = %e, "spliced write failed, overwriting value"),
        }
    }

    element
        .set_value(new_text)
        .map(|()| ReplaceStrategy::WholeValue)
        .map_err(|e| BridgeError::ReplaceFailed(e.to_string()))
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

fn has_selection<E: FocusedElement>(element: &E) -> bool {
    match element.selected_range() {
        Some(range) => !range.is_empty(),
        None => element
            .selected_text()
            .map(|t| !t.is_empty())
            .unwrap_or(false),
    }
}

fn splice_into_value<E: FocusedElement>(element: &E, new_text: &str) -> Result<(), AttributeWriteError> {
    let value = element.value().ok_or_else(|| AttributeWriteError {
        attribute: "value",
        reason: "element reports no value".to_string(),
    })?;
    let range = element.selected_range().ok_or_else(|| AttributeWriteError {
        attribute: "value",
        reason: "element reports no selection range".to_string(),
    })?;

    element.set_value(&splice_utf16(&value, range, new_text))
}

/// Text bridge running the policy on a blocking thread
pub struct FocusedTextBridge<B> {
    backend: Arc<B>,
}

impl<B> FocusedTextBridge<B>
where
    B: AccessibilityBackend + 'static,
{
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }
}

#[async_trait]
impl<B> TextBridge for FocusedTextBridge<B>
where
    B: AccessibilityBackend + 'static,
{
    async fn capture_focused_text(&self) -> Result<CaptureResult, BridgeError> {
        let backend = Arc::clone(&self.backend);

        // Accessibility calls block on the target application
        tokio::task::spawn_blocking(move || capture_from(backend.as_ref()))
            .await
            .map_err(|e| BridgeError::Unavailable(format!("Task join error: {}", e)))?
    }

    async fn replace_focused_text(&self, new_text: &str) -> Result<ReplaceStrategy, BridgeError> {
        let backend = Arc::clone(&self.backend);
        let new_text = new_text.to_owned();

        tokio::task::spawn_blocking(move || replace_in(backend.as_ref(), &new_text))
            .await
            .map_err(|e| BridgeError::Unavailable(format!("Task join error: {}", e)))?
    }
}
