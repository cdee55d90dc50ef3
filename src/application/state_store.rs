//! Single-slot store for the pending enhancement

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use super::ports::{Clock, SystemClock};
use crate::domain::enhancement::EnhancedPromptState;

/// Holds at most one pending enhancement with a validity window.
///
/// Writing overwrites the previous enhancement; only the most recent
/// analysis can ever be replaced. Clones share the same slot.
#[derive(Clone)]
pub struct PromptStateStore {
    slot: Arc<Mutex<Option<EnhancedPromptState>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl PromptStateStore {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
            ttl,
            clock,
        }
    }

    /// Create a store backed by the wall clock
    pub fn with_ttl(ttl: Duration) -> Self {
        Self::new(ttl, Arc::new(SystemClock))
    }

    fn slot(&self) -> MutexGuard<'_, Option<EnhancedPromptState>> {
        // Lock is only held for plain field access
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Overwrite the slot, stamping the state with the current time
    pub fn set(
        &self,
        enhanced_text: impl Into<String>,
        original_text: impl Into<String>,
        source_app_name: impl Into<String>,
    ) {
        let state = EnhancedPromptState::new(
            enhanced_text,
            original_text,
            source_app_name,
            self.clock.now(),
        );
        *self.slot() = Some(state);
    }

    /// The current state if it is still valid, leaving it in place
    pub fn get(&self) -> Option<EnhancedPromptState> {
        let now = self.clock.now();
        self.slot()
            .as_ref()
            .filter(|state| state.is_valid_at(now, self.ttl))
            .cloned()
    }

    /// Remove and return the state if it is still valid.
    ///
    /// An expired state is left untouched and `None` is returned.
    pub fn take_if_valid(&self) -> Option<EnhancedPromptState> {
        let now = self.clock.now();
        let mut slot = self.slot();
        match slot.as_ref() {
            Some(state) if state.is_valid_at(now, self.ttl) => slot.take(),
            _ => None,
        }
    }

    /// Clear the slot
    pub fn invalidate(&self) {
        self.slot().take();
    }
}
