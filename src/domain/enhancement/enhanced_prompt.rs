//! Pending enhancement entity

use std::time::{Duration, Instant};

/// Default time an enhancement stays replaceable (5 minutes)
pub const DEFAULT_ENHANCEMENT_TTL_SECS: u64 = 300;

/// An enhanced prompt waiting to be substituted for the text it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhancedPromptState {
    pub enhanced_text: String,
    pub original_text: String,
    pub source_app_name: String,
    pub created_at: Instant,
}

impl EnhancedPromptState {
    pub fn new(
        enhanced_text: impl Into<String>,
        original_text: impl Into<String>,
        source_app_name: impl Into<String>,
        created_at: Instant,
    ) -> Self {
        Self {
            enhanced_text: enhanced_text.into(),
            original_text: original_text.into(),
            source_app_name: source_app_name.into(),
            created_at,
        }
    }

    /// Valid while strictly less than `ttl` has elapsed since creation
    pub fn is_valid_at(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.created_at) < ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_at(created_at: Instant) -> EnhancedPromptState {
        EnhancedPromptState::new("better", "worse", "Notes", created_at)
    }

    #[test]
    fn valid_inside_window() {
        let start = Instant::now();
        let state = state_at(start);
        let ttl = Duration::from_secs(DEFAULT_ENHANCEMENT_TTL_SECS);

        assert!(state.is_valid_at(start, ttl));
        assert!(state.is_valid_at(start + Duration::from_secs(299), ttl));
    }

    #[test]
    fn invalid_at_and_after_ttl() {
        let start = Instant::now();
        let state = state_at(start);
        let ttl = Duration::from_secs(DEFAULT_ENHANCEMENT_TTL_SECS);

        assert!(!state.is_valid_at(start + Duration::from_secs(300), ttl));
        assert!(!state.is_valid_at(start + Duration::from_secs(301), ttl));
    }
}
