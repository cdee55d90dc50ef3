//! Display mode value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidDisplayModeError;

/// How an analysis result is shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplayMode {
    /// Transient desktop notification
    #[default]
    Notification,
    /// Blocking modal dialog
    Alert,
}

impl DisplayMode {
    /// Get the string identifier for this mode
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Notification => "notification",
            Self::Alert => "alert",
        }
    }

    /// The other mode
    pub const fn toggled(&self) -> Self {
        match self {
            Self::Notification => Self::Alert,
            Self::Alert => Self::Notification,
        }
    }
}

impl FromStr for DisplayMode {
    type Err = InvalidDisplayModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "notification" => Ok(Self::Notification),
            "alert" => Ok(Self::Alert),
            _ => Err(InvalidDisplayModeError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
