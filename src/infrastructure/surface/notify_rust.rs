//! Notification renderer using notify-rust

use async_trait::async_trait;
#[cfg(not(target_os = "macos"))]
use tokio::sync::oneshot;

use crate::application::ports::{icon_name, settled, PendingAction, RenderError, SurfaceRenderer};
use crate::domain::surface::Surface;
#[cfg(not(target_os = "macos"))]
use crate::domain::surface::SurfaceAction;

/// Renders surfaces as desktop notifications.
///
/// Actions are offered as notification buttons where the notification server
/// supports them; elsewhere the notification is informational only.
pub struct NotificationRenderer {
    app_name: String,
}

impl NotificationRenderer {
    pub fn new() -> Self {
        Self {
            app_name: super::APP_NAME.to_string(),
        }
    }
}

impl Default for NotificationRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn build(app_name: &str, surface: &Surface) -> notify_rust::Notification {
    let mut notification = notify_rust::Notification::new();
    notification
        .appname(app_name)
        .summary(&surface.title)
        .icon(icon_name(surface.tone));

    #[cfg(target_os = "macos")]
    {
        if let Some(subtitle) = &surface.subtitle {
            notification.subtitle(subtitle);
        }
        notification.body(&surface.body);
    }

    #[cfg(not(target_os = "macos"))]
    {
        let body = match &surface.subtitle {
            Some(subtitle) => format!("{}\n{}", subtitle, surface.body),
            None => surface.body.clone(),
        };
        notification.body(&body);
        for action in &surface.actions {
            notification.action(action.identifier(), action.label());
        }
    }

    notification
}

/// Show a notification with action buttons.
///
/// Some notification servers keep such notifications resident and never
/// report a close, so the wait runs on its own detached thread.
#[cfg(not(target_os = "macos"))]
async fn show_with_actions(notification: notify_rust::Notification) -> Result<PendingAction, RenderError> {
    let (shown_tx, shown_rx) = oneshot::channel();
    let (action_tx, action_rx) = oneshot::channel();

    std::thread::Builder::new()
        .name("notification-action".to_string())
        .spawn(move || {
            let handle = match notification.show() {
                Ok(handle) => handle,
                Err(e) => {
                    let _ = shown_tx.send(Err(RenderError::ShowFailed(e.to_string())));
                    return;
                }
            };
            let _ = shown_tx.send(Ok(()));
            handle.wait_for_action(|identifier| {
                let _ = action_tx.send(SurfaceAction::from_identifier(identifier));
            });
        })
        .map_err(|e| RenderError::ShowFailed(e.to_string()))?;

    shown_rx
        .await
        .map_err(|_| RenderError::ShowFailed("notification thread exited".to_string()))??;
    Ok(action_rx)
}

#[cfg(target_os = "macos")]
async fn show_with_actions(notification: notify_rust::Notification) -> Result<PendingAction, RenderError> {
    show(notification).await
}

async fn show(notification: notify_rust::Notification) -> Result<PendingAction, RenderError> {
    // notify-rust blocks while talking to the notification server
    tokio::task::spawn_blocking(move || notification.show().map(|_| ()))
        .await
        .map_err(|e| RenderError::ShowFailed(format!("Task join error: {}", e)))?
        .map_err(|e| RenderError::ShowFailed(e.to_string()))?;
    Ok(settled(None))
}

#[async_trait]
impl SurfaceRenderer for NotificationRenderer {
    async fn render(&self, surface: &Surface) -> Result<PendingAction, RenderError> {
        let notification = build(&self.app_name, surface);
        if surface.actions.is_empty() {
            show(notification).await
        } else {
            show_with_actions(notification).await
        }
    }
}
