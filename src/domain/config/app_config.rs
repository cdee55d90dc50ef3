//! Application configuration value object

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::display_mode::DisplayMode;
use crate::domain::enhancement::DEFAULT_ENHANCEMENT_TTL_SECS;
use crate::domain::hotkey::{DEFAULT_ANALYZE_HOTKEY, DEFAULT_REPLACE_HOTKEY};

/// Default scoring service base URL
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000";

/// Default request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 12;

/// Default bound on elements visited while searching for a focused element
pub const DEFAULT_MAX_ITEMS: usize = 20;

/// Default bound on tree depth while searching for a focused element
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Hotkey configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HotkeyConfig {
    pub analyze: Option<String>,
    pub replace: Option<String>,
}

/// Accessibility traversal limits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessibilityConfig {
    pub max_items: Option<usize>,
    pub max_depth: Option<usize>,
}

/// Bounds for the focused-element descendant search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalLimits {
    pub max_items: usize,
    pub max_depth: usize,
}

impl Default for TraversalLimits {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub display_mode: Option<String>,
    pub enhancement_ttl_secs: Option<u64>,
    pub hotkeys: Option<HotkeyConfig>,
    pub accessibility: Option<AccessibilityConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            endpoint: Some(DEFAULT_ENDPOINT.to_string()),
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
            display_mode: Some(DisplayMode::default().to_string()),
            enhancement_ttl_secs: Some(DEFAULT_ENHANCEMENT_TTL_SECS),
            hotkeys: Some(HotkeyConfig {
                analyze: Some(DEFAULT_ANALYZE_HOTKEY.to_string()),
                replace: Some(DEFAULT_REPLACE_HOTKEY.to_string()),
            }),
            accessibility: Some(AccessibilityConfig {
                max_items: Some(DEFAULT_MAX_ITEMS),
                max_depth: Some(DEFAULT_MAX_DEPTH),
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            endpoint: other.endpoint.or(self.endpoint),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
            display_mode: other.display_mode.or(self.display_mode),
            enhancement_ttl_secs: other.enhancement_ttl_secs.or(self.enhancement_ttl_secs),
            hotkeys: Self::merge_hotkeys(self.hotkeys, other.hotkeys),
            accessibility: Self::merge_accessibility(self.accessibility, other.accessibility),
        }
    }

    fn merge_hotkeys(base: Option<HotkeyConfig>, other: Option<HotkeyConfig>) -> Option<HotkeyConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(HotkeyConfig {
                analyze: o.analyze.or(b.analyze),
                replace: o.replace.or(b.replace),
            }),
        }
    }

    fn merge_accessibility(
        base: Option<AccessibilityConfig>,
        other: Option<AccessibilityConfig>,
    ) -> Option<AccessibilityConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(AccessibilityConfig {
                max_items: o.max_items.or(b.max_items),
                max_depth: o.max_depth.or(b.max_depth),
            }),
        }
    }

    /// Get endpoint, or the default if not set
    pub fn endpoint_or_default(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    /// Get request timeout, or the default if not set or zero
    pub fn timeout_or_default(&self) -> Duration {
        Duration::from_secs(
            self.timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Get display mode as parsed DisplayMode, or default if not set/invalid
    pub fn display_mode_or_default(&self) -> DisplayMode {
        self.display_mode
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get enhancement validity window, or the default if not set or zero
    pub fn enhancement_ttl_or_default(&self) -> Duration {
        Duration::from_secs(
            self.enhancement_ttl_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_ENHANCEMENT_TTL_SECS),
        )
    }

    /// Get analyze accelerator, or the default if not set
    pub fn analyze_hotkey_or_default(&self) -> &str {
        self.hotkeys
            .as_ref()
            .and_then(|h| h.analyze.as_deref())
            .unwrap_or(DEFAULT_ANALYZE_HOTKEY)
    }

    /// Get replace accelerator, or the default if not set
    pub fn replace_hotkey_or_default(&self) -> &str {
        self.hotkeys
            .as_ref()
            .and_then(|h| h.replace.as_deref())
            .unwrap_or(DEFAULT_REPLACE_HOTKEY)
    }

    /// Get traversal limits, falling back per field
    pub fn traversal_limits_or_default(&self) -> TraversalLimits {
        let defaults = TraversalLimits::default();
        let section = self.accessibility.as_ref();
        TraversalLimits {
            max_items: section
                .and_then(|a| a.max_items)
                .unwrap_or(defaults.max_items),
            max_depth: section
                .and_then(|a| a.max_depth)
                .unwrap_or(defaults.max_depth),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert_eq!(config.endpoint.as_deref(), Some(DEFAULT_ENDPOINT));
        assert_eq!(config.timeout_secs, Some(12));
        assert_eq!(config.display_mode.as_deref(), Some("notification"));
        assert_eq!(config.enhancement_ttl_secs, Some(300));
        assert_eq!(config.analyze_hotkey_or_default(), "CmdOrCtrl+Slash");
        assert_eq!(config.replace_hotkey_or_default(), "CmdOrCtrl+Period");
        assert_eq!(config.traversal_limits_or_default(), TraversalLimits::default());
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.endpoint.is_none());
        assert!(config.timeout_secs.is_none());
        assert!(config.display_mode.is_none());
        assert!(config.hotkeys.is_none());
        assert!(config.accessibility.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            endpoint: Some("http://base".to_string()),
            timeout_secs: Some(10),
            display_mode: Some("notification".to_string()),
            ..Default::default()
        };

        let other = AppConfig {
            endpoint: Some("http://other".to_string()),
            timeout_secs: None,
            display_mode: Some("alert".to_string()),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.endpoint.as_deref(), Some("http://other"));
        assert_eq!(merged.timeout_secs, Some(10));
        assert_eq!(merged.display_mode_or_default(), DisplayMode::Alert);
    }

    #[test]
    fn merge_hotkey_sections_per_field() {
        let base = AppConfig::defaults();
        let other = AppConfig {
            hotkeys: Some(HotkeyConfig {
                analyze: Some("Alt+KeyA".to_string()),
                replace: None,
            }),
            ..Default::default()
        };

        let merged = base.merge(other);
        assert_eq!(merged.analyze_hotkey_or_default(), "Alt+KeyA");
        assert_eq!(merged.replace_hotkey_or_default(), "CmdOrCtrl+Period");
    }

    #[test]
    fn merge_accessibility_sections_per_field() {
        let base = AppConfig::defaults();
        let other = AppConfig {
            accessibility: Some(AccessibilityConfig {
                max_items: Some(50),
                max_depth: None,
            }),
            ..Default::default()
        };

        let limits = base.merge(other).traversal_limits_or_default();
        assert_eq!(limits.max_items, 50);
        assert_eq!(limits.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn invalid_display_mode_falls_back() {
        let config = AppConfig {
            display_mode: Some("popup".to_string()),
            ..Default::default()
        };
        assert_eq!(config.display_mode_or_default(), DisplayMode::Notification);
    }

    #[test]
    fn zero_durations_fall_back() {
        let config = AppConfig {
            timeout_secs: Some(0),
            enhancement_ttl_secs: Some(0),
            ..Default::default()
        };
        assert_eq!(config.timeout_or_default(), Duration::from_secs(12));
        assert_eq!(config.enhancement_ttl_or_default(), Duration::from_secs(300));
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = AppConfig::empty();
        assert_eq!(config.endpoint_or_default(), DEFAULT_ENDPOINT);
        assert_eq!(config.timeout_or_default(), Duration::from_secs(12));
        assert_eq!(config.enhancement_ttl_or_default(), Duration::from_secs(300));
    }
}
