//! Surface renderers

mod dialog;
mod notify_rust;

pub use dialog::DialogRenderer;
pub use notify_rust::NotificationRenderer;

use crate::application::ports::SurfaceRenderer;

/// Application name shown on notifications
pub const APP_NAME: &str = "PromptLens";

/// Create the renderer for notification display mode
pub fn create_notification_renderer() -> Box<dyn SurfaceRenderer> {
    Box::new(NotificationRenderer::new())
}

/// Create the renderer for alert display mode
pub fn create_alert_renderer() -> Box<dyn SurfaceRenderer> {
    Box::new(DialogRenderer::new())
}
