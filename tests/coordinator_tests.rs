//! End-to-end flows through the coordinator
//!
//! The accessibility bridge and the clipboard are in-memory; the scoring
//! service is a local mock so the real HTTP client is exercised.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use prompt_lens::application::ports::{
    BridgeError, Clipboard, ClipboardError, ManualClock, NoOpStatusIndicator, ReplaceStrategy,
    TextBridge,
};
use prompt_lens::application::{
    ui_channel, AnalysisCoordinator, AnalysisOutcome, CoordinatorContext, PromptStateStore,
    ReplaceOutcome, UiHandle,
};
use prompt_lens::domain::capture::CaptureResult;
use prompt_lens::domain::coordinator::CoordinatorState;
use prompt_lens::domain::surface::{Surface, SurfaceAction, SurfaceTone};
use prompt_lens::domain::DisplayMode;
use prompt_lens::infrastructure::HttpScoringClient;
use serde_json::json;
use tokio::sync::mpsc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENHANCED: &str = "Fix the TypeError in my Python function...";

#[derive(Default)]
struct FakeBridge {
    writes: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl TextBridge for FakeBridge {
    async fn capture_focused_text(&self) -> Result<CaptureResult, BridgeError> {
        Ok(CaptureResult::new("fix my code", "TextEdit"))
    }

    async fn replace_focused_text(&self, new_text: &str) -> Result<ReplaceStrategy, BridgeError> {
        self.writes.lock().unwrap().push(new_text.to_string());
        Ok(ReplaceStrategy::SelectionAttribute)
    }
}

#[derive(Default)]
struct FakeClipboard {
    contents: Mutex<Vec<String>>,
}

#[async_trait]
impl Clipboard for FakeClipboard {
    async fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        self.contents.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

struct Harness {
    coordinator: AnalysisCoordinator<
        FakeBridge,
        HttpScoringClient,
        FakeClipboard,
        UiHandle,
        NoOpStatusIndicator,
    >,
    writes: Arc<Mutex<Vec<String>>>,
    clock: Arc<ManualClock>,
    ui: mpsc::Receiver<Surface>,
}

fn harness(endpoint: &str) -> Harness {
    let bridge = FakeBridge::default();
    let writes = Arc::clone(&bridge.writes);
    let clock = Arc::new(ManualClock::new());
    let store = PromptStateStore::new(Duration::from_secs(300), clock.clone());
    let context = CoordinatorContext::new(store, DisplayMode::Notification);
    let (handle, ui) = ui_channel(8);

    let coordinator = AnalysisCoordinator::new(
        bridge,
        HttpScoringClient::with_timeout(endpoint, Duration::from_secs(5)),
        FakeClipboard::default(),
        handle,
        NoOpStatusIndicator,
        context,
    );

    Harness {
        coordinator,
        writes,
        clock,
        ui,
    }
}

async fn scoring_service() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/score"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "score": {
                "specificity": 30,
                "context": 20,
                "clarity": 50,
                "structure": 40,
                "key_issues": ["No language", "No error message", "No goal"],
                "overall": 35
            },
            "improve": {
                "prompt": ENHANCED,
                "original_score": 35,
                "improved_score": 85,
                "improvement": 50
            }
        })))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn analyze_then_replace_writes_enhanced_prompt() {
    let server = scoring_service().await;
    let mut h = harness(&server.uri());

    let outcome = h.coordinator.analyze().await;
    let AnalysisOutcome::Presented { surface, stored } = outcome else {
        panic!("expected a presented surface, got {:?}", outcome);
    };
    assert!(stored);
    assert_eq!(surface.title, "Prompt Score: 35/100");
    assert_eq!(surface.subtitle.as_deref(), Some("From TextEdit"));
    assert_eq!(surface.tone, SurfaceTone::Caution);
    assert_eq!(
        surface.actions,
        vec![
            SurfaceAction::CopyEnhanced,
            SurfaceAction::CopyOriginal,
            SurfaceAction::ViewDetails
        ]
    );
    assert_eq!(h.ui.recv().await, Some(surface));
    assert_eq!(h.coordinator.state(), CoordinatorState::Idle);

    h.clock.advance(Duration::from_secs(60));
    assert_eq!(
        h.coordinator.replace().await,
        ReplaceOutcome::Replaced(ReplaceStrategy::SelectionAttribute)
    );
    assert_eq!(*h.writes.lock().unwrap(), vec![ENHANCED.to_string()]);

    // Consumed by the first replace
    assert_eq!(
        h.coordinator.replace().await,
        ReplaceOutcome::NoRecentEnhancement
    );
    assert_eq!(h.writes.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn expired_enhancement_is_not_written() {
    let server = scoring_service().await;
    let h = harness(&server.uri());

    h.coordinator.analyze().await;
    h.clock.advance(Duration::from_secs(301));

    assert_eq!(
        h.coordinator.replace().await,
        ReplaceOutcome::NoRecentEnhancement
    );
    assert!(h.writes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unreachable_service_stores_nothing() {
    let mut h = harness("http://127.0.0.1:9");

    let outcome = h.coordinator.analyze().await;
    let AnalysisOutcome::Presented { surface, stored } = outcome else {
        panic!("expected a presented surface, got {:?}", outcome);
    };
    assert!(!stored);
    assert_eq!(surface.tone, SurfaceTone::Error);
    assert_eq!(surface.actions, vec![SurfaceAction::CopyOriginal]);
    assert_eq!(surface.payload.original_text, "fix my code");
    assert!(h.ui.recv().await.is_some());

    assert_eq!(
        h.coordinator.replace().await,
        ReplaceOutcome::NoRecentEnhancement
    );
    let guidance = h.ui.recv().await.unwrap();
    assert!(guidance.body.contains("No recent enhanced prompt"));
}

#[tokio::test]
async fn toggle_switches_mode_for_next_surface() {
    let mut h = harness("http://127.0.0.1:9");

    assert_eq!(h.coordinator.toggle_display_mode().await, DisplayMode::Alert);
    assert_eq!(h.coordinator.context().display_mode.get(), DisplayMode::Alert);
    assert!(h.ui.recv().await.is_some());

    assert_eq!(
        h.coordinator.toggle_display_mode().await,
        DisplayMode::Notification
    );
}

#[tokio::test]
async fn stalled_presentation_never_blocks_analysis() {
    let server = scoring_service().await;
    // Nobody drains the UI queue, as when the worker waits on an unclicked surface
    let h = harness(&server.uri());

    for _ in 0..20 {
        let outcome = tokio::time::timeout(Duration::from_secs(5), h.coordinator.analyze())
            .await
            .expect("analyze waited on the UI queue");
        assert!(matches!(
            outcome,
            AnalysisOutcome::Presented { stored: true, .. }
        ));
        assert_eq!(h.coordinator.state(), CoordinatorState::Idle);
    }
}

#[tokio::test]
async fn failed_rescore_leaves_nothing_to_replace() {
    let server = scoring_service().await;
    let h = harness(&server.uri());
    h.coordinator.analyze().await;

    server.reset().await;
    Mock::given(method("POST"))
        .and(path("/score"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>502</html>"))
        .mount(&server)
        .await;

    let outcome = h.coordinator.analyze().await;
    assert!(matches!(
        outcome,
        AnalysisOutcome::Presented { stored: false, .. }
    ));
    assert_eq!(
        h.coordinator.replace().await,
        ReplaceOutcome::NoRecentEnhancement
    );
    assert!(h.writes.lock().unwrap().is_empty());
}
