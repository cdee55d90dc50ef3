//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod clipboard;
pub mod clock;
pub mod config;
pub mod scorer;
pub mod status;
pub mod surface;
pub mod text_bridge;

// Re-export common types
pub use clipboard::{Clipboard, ClipboardError};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::ConfigStore;
pub use scorer::{RawResponse, Scorer};
pub use status::{NoOpStatusIndicator, StatusIndicator};
pub use surface::{icon_name, settled, PendingAction, RenderError, SurfaceRenderer, SurfaceSink};
pub use text_bridge::{
    AccessibilityBackend, AttributeWriteError, BridgeError, FocusedElement, ReplaceStrategy,
    TextBridge,
};
