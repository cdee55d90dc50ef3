//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod capture;
pub mod config;
pub mod coordinator;
pub mod display_mode;
pub mod enhancement;
pub mod error;
pub mod hotkey;
pub mod scoring;
pub mod surface;

// Re-export common types
pub use capture::{CaptureResult, TextRange};
pub use config::AppConfig;
pub use coordinator::{CoordinatorSession, CoordinatorState};
pub use display_mode::DisplayMode;
pub use enhancement::EnhancedPromptState;
pub use error::*;
pub use hotkey::{HotkeyBinding, HotkeyCommand, HotkeyMap};
pub use scoring::{ScoreBand, ScoreOutcome, ScoreResult};
pub use surface::{ActionPayload, Surface, SurfaceAction, SurfaceKind, SurfaceTone};
