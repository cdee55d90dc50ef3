//! Process-wide coordinator context

use std::sync::{Arc, RwLock};

use super::state_store::PromptStateStore;
use crate::domain::display_mode::DisplayMode;

/// Runtime display mode preference, shared by clones.
///
/// Starts from the configured value and is never written back.
#[derive(Debug, Clone, Default)]
pub struct DisplayModeSetting {
    mode: Arc<RwLock<DisplayMode>>,
}

impl DisplayModeSetting {
    pub fn new(initial: DisplayMode) -> Self {
        Self {
            mode: Arc::new(RwLock::new(initial)),
        }
    }

    pub fn get(&self) -> DisplayMode {
        *self.mode.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Flip the mode and return the new value
    pub fn toggle(&self) -> DisplayMode {
        let mut mode = self.mode.write().unwrap_or_else(|e| e.into_inner());
        *mode = mode.toggled();
        *mode
    }
}

/// Shared state handed to every component at construction.
///
/// One instance is created by the process entry point; clones share it.
#[derive(Clone)]
pub struct CoordinatorContext {
    pub store: PromptStateStore,
    pub display_mode: DisplayModeSetting,
}

impl CoordinatorContext {
    pub fn new(store: PromptStateStore, display_mode: DisplayMode) -> Self {
        Self {
            store,
            display_mode: DisplayModeSetting::new(display_mode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn toggle_is_visible_through_clones() {
        let setting = DisplayModeSetting::new(DisplayMode::Notification);
        let other = setting.clone();

        assert_eq!(setting.toggle(), DisplayMode::Alert);
        assert_eq!(other.get(), DisplayMode::Alert);
        assert_eq!(other.toggle(), DisplayMode::Notification);
        assert_eq!(setting.get(), DisplayMode::Notification);
    }

    #[test]
    fn context_clones_share_store() {
        let context = CoordinatorContext::new(
            PromptStateStore::with_ttl(Duration::from_secs(300)),
            DisplayMode::Alert,
        );
        let other = context.clone();

        context.store.set("better", "worse", "Notes");
        assert!(other.store.get().is_some());
        assert_eq!(other.display_mode.get(), DisplayMode::Alert);
    }
}
