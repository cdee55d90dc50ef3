//! Analysis coordinator use case
//!
//! Owns the capture -> score -> present flow and the retrieve -> replace
//! flow. It is the only component that talks to all the ports.

use std::sync::{Arc, Mutex, MutexGuard};

use super::context::CoordinatorContext;
use super::ports::{
    BridgeError, Clipboard, RawResponse, ReplaceStrategy, Scorer, StatusIndicator, SurfaceSink,
    TextBridge,
};
use super::presentation::PresentationRouter;
use crate::domain::coordinator::{CoordinatorSession, CoordinatorState, InvalidStateTransition};
use crate::domain::display_mode::DisplayMode;
use crate::domain::hotkey::HotkeyCommand;
use crate::domain::scoring::ScoreOutcome;
use crate::domain::surface::Surface;

/// Result of one analyze command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// A scoring response was presented
    Presented {
        surface: Surface,
        /// Whether an enhancement was stored for a later replace
        stored: bool,
    },
    /// Nothing was sent to the scoring service
    Guidance(Surface),
    /// Another flow was in progress
    Dropped,
}

/// Result of one replace command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplaceOutcome {
    Replaced(ReplaceStrategy),
    /// Writing failed; the enhanced text was copied instead
    CopiedToClipboard,
    /// Writing and the clipboard fallback both failed
    Failed(String),
    NoRecentEnhancement,
    Dropped,
}

/// Top-level orchestrator
pub struct AnalysisCoordinator<B, S, C, P, I>
where
    B: TextBridge,
    S: Scorer,
    C: Clipboard,
    P: SurfaceSink,
    I: StatusIndicator,
{
    bridge: B,
    scorer: S,
    clipboard: C,
    sink: P,
    indicator: I,
    context: CoordinatorContext,
    session: Mutex<CoordinatorSession>,
}

impl<B, S, C, P, I> AnalysisCoordinator<B, S, C, P, I>
where
    B: TextBridge,
    S: Scorer,
    C: Clipboard,
    P: SurfaceSink,
    I: StatusIndicator,
{
    pub fn new(
        bridge: B,
        scorer: S,
        clipboard: C,
        sink: P,
        indicator: I,
        context: CoordinatorContext,
    ) -> Self {
        Self {
            bridge,
            scorer,
            clipboard,
            sink,
            indicator,
            context,
            session: Mutex::new(CoordinatorSession::new()),
        }
    }

    /// Get current coordinator state
    pub fn state(&self) -> CoordinatorState {
        self.session().state()
    }

    pub fn context(&self) -> &CoordinatorContext {
        &self.context
    }

    /// Flip the display mode used for the next surface
    pub async fn toggle_display_mode(&self) -> DisplayMode {
        let mode = self.context.display_mode.toggle();
        tracing::info!(mode = %mode, "display mode changed");
        self.sink
            .present(PresentationRouter::display_mode_changed(mode))
            .await;
        mode
    }

    /// Capture the focused text, score it and present the result
    pub async fn analyze(&self) -> AnalysisOutcome {
        if !self.try_begin(HotkeyCommand::Analyze) {
            return AnalysisOutcome::Dropped;
        }
        self.run_analysis().await
    }

    /// Replace the focused text with the most recent valid enhancement
    pub async fn replace(&self) -> ReplaceOutcome {
        if !self.try_begin(HotkeyCommand::Replace) {
            return ReplaceOutcome::Dropped;
        }
        self.run_replace().await
    }

    fn session(&self) -> MutexGuard<'_, CoordinatorSession> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Leave idle for `command`, or report that it must be dropped
    fn try_begin(&self, command: HotkeyCommand) -> bool {
        let begun = {
            let mut session = self.session();
            match command {
                HotkeyCommand::Analyze => session.begin_capture(),
                HotkeyCommand::Replace => session.begin_replace(),
            }
        };

        match begun {
            Ok(()) => {
                self.indicator.set_busy(true);
                true
            }
            Err(e) => {
                tracing::debug!(command = %command, error = %e, "command dropped");
                false
            }
        }
    }

    fn advance(&self, step: fn(&mut CoordinatorSession) -> Result<(), InvalidStateTransition>) {
        let result = step(&mut self.session());
        if let Err(e) = result {
            tracing::warn!(error = %e, "unexpected coordinator transition");
        }
    }

    fn finish(&self, step: fn(&mut CoordinatorSession) -> Result<(), InvalidStateTransition>) {
        self.advance(step);
        self.indicator.set_busy(false);
    }

    async fn run_analysis(&self) -> AnalysisOutcome {
        let capture = match self.bridge.capture_focused_text().await {
            Ok(capture) if !capture.is_empty() => capture,
            Ok(_) => return self.abort_capture(PresentationRouter::no_text()).await,
            Err(e) => {
                tracing::info!(error = %e, "capture failed");
                return self.abort_capture(guidance_for(&e)).await;
            }
        };

        tracing::info!(
            app = capture.source_app_name(),
            chars = capture.text().chars().count(),
            "captured text"
        );
        self.advance(CoordinatorSession::begin_scoring);

        let raw = self.scorer.score(capture.text()).await;

        self.advance(CoordinatorSession::begin_presenting);

        let (surface, enhancement) = match &raw {
            RawResponse::ConnectionFailed(reason) => {
                tracing::warn!(reason = %reason, "scoring request failed");
                (PresentationRouter::connection_failed(&capture, reason), None)
            }
            RawResponse::Body(body) => {
                let outcome = ScoreOutcome::from_body(body);
                let enhancement = match outcome.structured() {
                    Some(result) if result.has_improvement() => Some(result.improved_prompt.clone()),
                    Some(_) => None,
                    None => {
                        tracing::debug!("response is not a score document, showing raw text");
                        None
                    }
                };
                (PresentationRouter::summary(&capture, &outcome), enhancement)
            }
        };

        // Only the latest analysis is ever replaceable
        let stored = match enhancement {
            Some(enhanced_text) => {
                self.context.store.set(
                    enhanced_text,
                    capture.text(),
                    capture.source_app_name(),
                );
                true
            }
            None => {
                self.context.store.invalidate();
                false
            }
        };

        self.sink.present(surface.clone()).await;
        self.finish(CoordinatorSession::finish_presenting);

        AnalysisOutcome::Presented { surface, stored }
    }

    async fn abort_capture(&self, guidance: Surface) -> AnalysisOutcome {
        self.sink.present(guidance.clone()).await;
        self.finish(CoordinatorSession::abort_capture);
        AnalysisOutcome::Guidance(guidance)
    }

    async fn run_replace(&self) -> ReplaceOutcome {
        let outcome = match self.context.store.take_if_valid() {
            None => {
                self.sink
                    .present(PresentationRouter::no_recent_enhancement())
                    .await;
                ReplaceOutcome::NoRecentEnhancement
            }
            Some(state) => match self.bridge.replace_focused_text(&state.enhanced_text).await {
                Ok(strategy) => {
                    tracing::info!(strategy = strategy.as_str(), "replaced focused text");
                    self.sink.present(PresentationRouter::replaced(strategy)).await;
                    ReplaceOutcome::Replaced(strategy)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "replace failed, copying to clipboard");
                    match self.clipboard.copy(&state.enhanced_text).await {
                        Ok(()) => {
                            self.sink.present(PresentationRouter::clipboard_fallback()).await;
                            ReplaceOutcome::CopiedToClipboard
                        }
                        Err(ce) => {
                            let reason = ce.to_string();
                            self.sink
                                .present(PresentationRouter::replace_failed(&reason))
                                .await;
                            ReplaceOutcome::Failed(reason)
                        }
                    }
                }
            },
        };

        self.finish(CoordinatorSession::finish_replace);
        outcome
    }
}

impl<B, S, C, P, I> AnalysisCoordinator<B, S, C, P, I>
where
    B: TextBridge + 'static,
    S: Scorer + 'static,
    C: Clipboard + 'static,
    P: SurfaceSink + 'static,
    I: StatusIndicator + 'static,
{
    /// Start a command in the background.
    ///
    /// The busy check happens before this returns, so a second command
    /// arriving right after is dropped rather than overlapping.
    pub fn dispatch(self: &Arc<Self>, command: HotkeyCommand) -> bool {
        if !self.try_begin(command) {
            return false;
        }

        let coordinator = Arc::clone(self);
        tokio::spawn(async move {
            match command {
                HotkeyCommand::Analyze => {
                    coordinator.run_analysis().await;
                }
                HotkeyCommand::Replace => {
                    coordinator.run_replace().await;
                }
            }
        });
        true
    }
}

/// Guidance surface for a failed capture
fn guidance_for(error: &BridgeError) -> Surface {
    match error {
        BridgeError::PermissionDenied => PresentationRouter::permission_denied(),
        BridgeError::NoFocusedElement => PresentationRouter::no_focused_element(),
        BridgeError::NoText => PresentationRouter::no_text(),
        BridgeError::ReplaceFailed(reason) | BridgeError::Unavailable(reason) => {
            PresentationRouter::bridge_unavailable(reason)
        }
    }
}
