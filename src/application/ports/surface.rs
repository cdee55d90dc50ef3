//! Surface rendering port interfaces

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::oneshot;

use crate::domain::surface::{Surface, SurfaceAction, SurfaceTone};

/// Rendering errors
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    #[error("{0} not found")]
    ToolNotFound(&'static str),

    #[error("Failed to show surface: {0}")]
    ShowFailed(String),
}

/// Freedesktop icon name for a surface tone
pub const fn icon_name(tone: SurfaceTone) -> &'static str {
    match tone {
        SurfaceTone::Positive => "emblem-default",
        SurfaceTone::Caution => "dialog-warning",
        SurfaceTone::Negative => "dialog-error",
        SurfaceTone::Info => "dialog-information",
        SurfaceTone::Success => "dialog-ok",
        SurfaceTone::Warning => "dialog-warning",
        SurfaceTone::Error => "dialog-error",
    }
}

/// The action a user eventually picks on a shown surface.
///
/// Resolves to `None` when the surface is dismissed; a dropped sender means
/// the same.
pub type PendingAction = oneshot::Receiver<Option<SurfaceAction>>;

/// A pending action that is already settled
pub fn settled(action: Option<SurfaceAction>) -> PendingAction {
    let (tx, rx) = oneshot::channel();
    let _ = tx.send(action);
    rx
}

/// Port for showing a surface to the user
#[async_trait]
pub trait SurfaceRenderer: Send + Sync {
    /// Show the surface. Returns once it is on screen; the user's choice
    /// arrives later through the pending action.
    async fn render(&self, surface: &Surface) -> Result<PendingAction, RenderError>;
}

#[async_trait]
impl SurfaceRenderer for Box<dyn SurfaceRenderer> {
    async fn render(&self, surface: &Surface) -> Result<PendingAction, RenderError> {
        self.as_ref().render(surface).await
    }
}

/// Port through which the coordinator hands surfaces to the UI context
#[async_trait]
pub trait SurfaceSink: Send + Sync {
    /// Enqueue a surface for display; never waits for the user or for queue space
    async fn present(&self, surface: Surface);
}
