//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod context;
pub mod coordinator;
pub mod focused_text;
pub mod ports;
pub mod presentation;
pub mod state_store;

// Re-export use cases
pub use context::{CoordinatorContext, DisplayModeSetting};
pub use coordinator::{AnalysisCoordinator, AnalysisOutcome, ReplaceOutcome};
pub use focused_text::FocusedTextBridge;
pub use presentation::{
    ui_channel, ActionEffect, PresentationRouter, PresentationWorker, UiHandle,
};
pub use state_store::PromptStateStore;
