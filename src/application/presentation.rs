//! Presentation routing
//!
//! `PresentationRouter` turns scoring outcomes into surfaces and resolves the
//! action a user picked. `PresentationWorker` is the single task that shows
//! surfaces; everything else hands surfaces to it through a `UiHandle`
//! without ever waiting on it.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use super::context::DisplayModeSetting;
use super::ports::{Clipboard, ReplaceStrategy, SurfaceRenderer, SurfaceSink};
use crate::domain::capture::CaptureResult;
use crate::domain::display_mode::DisplayMode;
use crate::domain::scoring::{ScoreOutcome, ScoreResult};
use crate::domain::surface::{ActionPayload, Surface, SurfaceAction, SurfaceKind, SurfaceTone};

/// Title shared by guidance surfaces
pub const GUIDANCE_TITLE: &str = "PromptLens";

/// Key issues shown on a summary surface before truncating
pub const SUMMARY_KEY_ISSUES: usize = 2;

const STRUCTURED_WITH_IMPROVEMENT: &[SurfaceAction] = &[
    SurfaceAction::CopyEnhanced,
    SurfaceAction::CopyOriginal,
    SurfaceAction::ViewDetails,
];

const STRUCTURED_WITHOUT_IMPROVEMENT: &[SurfaceAction] =
    &[SurfaceAction::CopyFeedback, SurfaceAction::ViewFeedback];

const UNSTRUCTURED: &[SurfaceAction] = &[SurfaceAction::CopyOriginal];

/// Side effect of a picked action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionEffect {
    CopyToClipboard(String),
    OpenDetails(Surface),
}

/// Builds surfaces from capture and scoring data. Holds no state.
pub struct PresentationRouter;

impl PresentationRouter {
    /// First surface shown after a scoring request resolves
    pub fn summary(capture: &CaptureResult, outcome: &ScoreOutcome) -> Surface {
        match outcome {
            ScoreOutcome::Structured(result) => Self::structured_summary(capture, result),
            ScoreOutcome::Unstructured(text) => Surface {
                kind: SurfaceKind::Summary,
                title: "Prompt Feedback".to_string(),
                subtitle: Self::subtitle(capture),
                body: text.clone(),
                tone: SurfaceTone::Info,
                actions: UNSTRUCTURED.to_vec(),
                payload: ActionPayload {
                    original_text: capture.text().to_string(),
                    enhanced_text: None,
                    feedback: text.clone(),
                },
            },
        }
    }

    /// Summary for a request that never produced a response body
    pub fn connection_failed(capture: &CaptureResult, reason: &str) -> Surface {
        Surface {
            kind: SurfaceKind::Summary,
            title: "Scoring service unavailable".to_string(),
            subtitle: Self::subtitle(capture),
            body: format!("Could not reach the scoring service: {}", reason),
            tone: SurfaceTone::Error,
            actions: UNSTRUCTURED.to_vec(),
            payload: ActionPayload {
                original_text: capture.text().to_string(),
                enhanced_text: None,
                feedback: reason.to_string(),
            },
        }
    }

    fn structured_summary(capture: &CaptureResult, result: &ScoreResult) -> Surface {
        let mut lines = Vec::new();
        if let Some(delta) = result.improvement_delta {
            lines.push(format!("Improvement: {:+}", delta));
        }
        for issue in result.key_issues.iter().take(SUMMARY_KEY_ISSUES) {
            lines.push(format!("• {}", issue));
        }
        if result.key_issues.len() > SUMMARY_KEY_ISSUES {
            lines.push("…".to_string());
        }
        if lines.is_empty() {
            lines.push("No key issues found".to_string());
        }

        let (actions, enhanced_text) = if result.has_improvement() {
            (
                STRUCTURED_WITH_IMPROVEMENT,
                Some(result.improved_prompt.clone()),
            )
        } else {
            (STRUCTURED_WITHOUT_IMPROVEMENT, None)
        };

        Surface {
            kind: SurfaceKind::Summary,
            title: format!("Prompt Score: {}/100", result.overall),
            subtitle: Self::subtitle(capture),
            body: lines.join("\n"),
            tone: result.band().into(),
            actions: actions.to_vec(),
            payload: ActionPayload {
                original_text: capture.text().to_string(),
                enhanced_text,
                feedback: Self::detail_text(result),
            },
        }
    }

    /// Full report: every sub-score, every key issue and the improved prompt verbatim
    pub fn detail_text(result: &ScoreResult) -> String {
        let mut text = format!(
            "Overall: {}/100\nSpecificity: {}\nContext: {}\nClarity: {}\nStructure: {}",
            result.overall, result.specificity, result.context, result.clarity, result.structure
        );

        if let (Some(original), Some(improved)) = (result.original_score, result.improved_score) {
            text.push_str(&format!("\nScore: {} → {}", original, improved));
        }
        if let Some(delta) = result.improvement_delta {
            text.push_str(&format!("\nImprovement: {:+}", delta));
        }

        if !result.key_issues.is_empty() {
            text.push_str("\n\nKey issues:");
            for issue in &result.key_issues {
                text.push_str(&format!("\n• {}", issue));
            }
        }

        if result.has_improvement() {
            text.push_str("\n\nImproved prompt:\n");
            text.push_str(&result.improved_prompt);
        }

        text
    }

    /// Secondary surface opened from a view action
    pub fn details(surface: &Surface) -> Surface {
        Surface {
            kind: SurfaceKind::Details,
            title: surface.title.clone(),
            subtitle: surface.subtitle.clone(),
            body: surface.payload.feedback.clone(),
            tone: surface.tone,
            actions: surface
                .actions
                .iter()
                .copied()
                .filter(|a| !a.is_view())
                .collect(),
            payload: surface.payload.clone(),
        }
    }

    /// Map a picked action to its single side effect.
    ///
    /// Returns `None` for actions the surface does not offer.
    pub fn resolve(surface: &Surface, action: SurfaceAction) -> Option<ActionEffect> {
        if !surface.has_action(action) {
            return None;
        }

        let payload = &surface.payload;
        match action {
            SurfaceAction::CopyEnhanced => payload
                .enhanced_text
                .clone()
                .map(ActionEffect::CopyToClipboard),
            SurfaceAction::CopyOriginal => {
                Some(ActionEffect::CopyToClipboard(payload.original_text.clone()))
            }
            SurfaceAction::CopyFeedback => {
                Some(ActionEffect::CopyToClipboard(payload.feedback.clone()))
            }
            SurfaceAction::ViewDetails | SurfaceAction::ViewFeedback => {
                Some(ActionEffect::OpenDetails(Self::details(surface)))
            }
        }
    }

    fn subtitle(capture: &CaptureResult) -> Option<String> {
        let app = capture.source_app_name().trim();
        (!app.is_empty()).then(|| format!("From {}", app))
    }

    // Guidance surfaces

    pub fn permission_denied() -> Surface {
        Surface::guidance(
            GUIDANCE_TITLE,
            "Accessibility permission is required. Grant it in system settings and try again.",
            SurfaceTone::Warning,
        )
    }

    pub fn no_focused_element() -> Surface {
        Surface::guidance(
            GUIDANCE_TITLE,
            "No text field has focus. Click into a text field and try again.",
            SurfaceTone::Info,
        )
    }

    pub fn no_text() -> Surface {
        Surface::guidance(
            GUIDANCE_TITLE,
            "Select some text first, then press the analyze shortcut.",
            SurfaceTone::Info,
        )
    }

    pub fn bridge_unavailable(reason: &str) -> Surface {
        Surface::guidance(
            GUIDANCE_TITLE,
            format!("Could not read the focused text: {}", reason),
            SurfaceTone::Error,
        )
    }

    pub fn no_recent_enhancement() -> Surface {
        Surface::guidance(
            GUIDANCE_TITLE,
            "No recent enhanced prompt. Analyze some text first.",
            SurfaceTone::Info,
        )
    }

    pub fn replaced(strategy: ReplaceStrategy) -> Surface {
        tracing::debug!(strategy = strategy.as_str(), "replacement applied");
        Surface::guidance(
            GUIDANCE_TITLE,
            "Replaced with the enhanced prompt.",
            SurfaceTone::Success,
        )
    }

    pub fn clipboard_fallback() -> Surface {
        Surface::guidance(
            GUIDANCE_TITLE,
            "Could not replace the text. The enhanced prompt was copied to the clipboard.",
            SurfaceTone::Warning,
        )
    }

    pub fn replace_failed(reason: &str) -> Surface {
        Surface::guidance(
            GUIDANCE_TITLE,
            format!("Could not replace the text or copy it: {}", reason),
            SurfaceTone::Error,
        )
    }

    pub fn display_mode_changed(mode: DisplayMode) -> Surface {
        Surface::guidance(
            GUIDANCE_TITLE,
            format!("Results will be shown as {}s.", mode),
            SurfaceTone::Info,
        )
    }
}

/// Create the channel between producers and the presentation worker
pub fn ui_channel(capacity: usize) -> (UiHandle, mpsc::Receiver<Surface>) {
    let (tx, rx) = mpsc::channel(capacity);
    (UiHandle { tx }, rx)
}

/// Enqueues surfaces for the presentation worker
#[derive(Clone)]
pub struct UiHandle {
    tx: mpsc::Sender<Surface>,
}

#[async_trait]
impl SurfaceSink for UiHandle {
    async fn present(&self, surface: Surface) {
        match self.tx.try_send(surface) {
            Ok(()) => {}
            Err(TrySendError::Full(surface)) => {
                tracing::warn!(title = %surface.title, "presentation queue full, dropping surface");
            }
            Err(TrySendError::Closed(_)) => {
                tracing::warn!("presentation worker stopped, dropping surface");
            }
        }
    }
}

/// An action picked on a shown surface
type Picked = (Surface, SurfaceAction);

/// Owns the renderers and shows one surface at a time.
///
/// Showing never waits for the user: each picked action comes back through
/// an internal channel and is followed in turn.
pub struct PresentationWorker<N, A, C>
where
    N: SurfaceRenderer,
    A: SurfaceRenderer,
    C: Clipboard,
{
    notification: N,
    alert: A,
    clipboard: C,
    display_mode: DisplayModeSetting,
    picked_tx: mpsc::UnboundedSender<Picked>,
    picked_rx: mpsc::UnboundedReceiver<Picked>,
}

impl<N, A, C> PresentationWorker<N, A, C>
where
    N: SurfaceRenderer,
    A: SurfaceRenderer,
    C: Clipboard,
{
    pub fn new(notification: N, alert: A, clipboard: C, display_mode: DisplayModeSetting) -> Self {
        let (picked_tx, picked_rx) = mpsc::unbounded_channel();
        Self {
            notification,
            alert,
            clipboard,
            display_mode,
            picked_tx,
            picked_rx,
        }
    }

    /// Show surfaces and follow picked actions until every `UiHandle` is dropped
    pub async fn run(mut self, mut rx: mpsc::Receiver<Surface>) {
        loop {
            tokio::select! {
                surface = rx.recv() => match surface {
                    Some(surface) => self.show(surface).await,
                    None => break,
                },
                Some((surface, action)) = self.picked_rx.recv() => {
                    self.follow(&surface, action).await;
                }
            }
        }
        tracing::debug!("presentation worker finished");
    }

    /// Put a surface on screen and wait for the user's choice in the background
    pub async fn show(&self, surface: Surface) {
        let rendered = match self.display_mode.get() {
            DisplayMode::Notification => self.notification.render(&surface).await,
            DisplayMode::Alert => self.alert.render(&surface).await,
        };

        let pending = match rendered {
            Ok(pending) => pending,
            Err(e) => {
                tracing::warn!(error = %e, title = %surface.title, "failed to show surface");
                return;
            }
        };

        if surface.actions.is_empty() {
            return;
        }

        let picked_tx = self.picked_tx.clone();
        tokio::spawn(async move {
            if let Ok(Some(action)) = pending.await {
                let _ = picked_tx.send((surface, action));
            }
        });
    }

    /// Perform the side effect of an action picked on `surface`
    pub async fn follow(&self, surface: &Surface, action: SurfaceAction) {
        match PresentationRouter::resolve(surface, action) {
            Some(ActionEffect::CopyToClipboard(text)) => {
                if let Err(e) = self.clipboard.copy(&text).await {
                    tracing::warn!(error = %e, action = action.identifier(), "copy failed");
                }
            }
            Some(ActionEffect::OpenDetails(details)) => self.show(details).await,
            None => {
                tracing::debug!(action = action.identifier(), "ignoring action not offered");
            }
        }
    }
}
