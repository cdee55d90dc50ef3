//! Coordinator session state machine

use std::fmt;
use thiserror::Error;

/// Coordinator states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CoordinatorState {
    #[default]
    Idle,
    Capturing,
    Scoring,
    Presenting,
    Replacing,
}

impl CoordinatorState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Capturing => "capturing",
            Self::Scoring => "scoring",
            Self::Presenting => "presenting",
            Self::Replacing => "replacing",
        }
    }
}

impl fmt::Display for CoordinatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidStateTransition {
    pub current_state: CoordinatorState,
    pub action: String,
}

/// Coordinator session entity.
/// Manages state transitions for the analyze and replace flows.
///
/// State machine:
///   IDLE -> CAPTURING (begin_capture)
///   CAPTURING -> SCORING (begin_scoring)
///   CAPTURING -> IDLE (abort_capture)
///   SCORING -> PRESENTING (begin_presenting)
///   PRESENTING -> IDLE (finish_presenting)
///   IDLE -> REPLACING (begin_replace)
///   REPLACING -> IDLE (finish_replace)
#[derive(Debug, Default)]
pub struct CoordinatorSession {
    state: CoordinatorState,
}

impl CoordinatorSession {
    /// Create a new session in idle state
    pub fn new() -> Self {
        Self {
            state: CoordinatorState::Idle,
        }
    }

    /// Get the current state
    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    /// Check if currently idle
    pub fn is_idle(&self) -> bool {
        self.state == CoordinatorState::Idle
    }

    /// Busy whenever a flow is in progress
    pub fn is_busy(&self) -> bool {
        !self.is_idle()
    }

    fn transition(
        &mut self,
        from: CoordinatorState,
        to: CoordinatorState,
        action: &str,
    ) -> Result<(), InvalidStateTransition> {
        if self.state != from {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: action.to_string(),
            });
        }
        self.state = to;
        Ok(())
    }

    /// Transition from IDLE to CAPTURING
    pub fn begin_capture(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(
            CoordinatorState::Idle,
            CoordinatorState::Capturing,
            "begin capture",
        )
    }

    /// Transition from CAPTURING to SCORING
    pub fn begin_scoring(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(
            CoordinatorState::Capturing,
            CoordinatorState::Scoring,
            "begin scoring",
        )
    }

    /// Transition from CAPTURING to IDLE (nothing to score)
    pub fn abort_capture(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(
            CoordinatorState::Capturing,
            CoordinatorState::Idle,
            "abort capture",
        )
    }

    /// Transition from SCORING to PRESENTING
    pub fn begin_presenting(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(
            CoordinatorState::Scoring,
            CoordinatorState::Presenting,
            "begin presenting",
        )
    }

    /// Transition from PRESENTING to IDLE
    pub fn finish_presenting(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(
            CoordinatorState::Presenting,
            CoordinatorState::Idle,
            "finish presenting",
        )
    }

    /// Transition from IDLE to REPLACING
    pub fn begin_replace(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(
            CoordinatorState::Idle,
            CoordinatorState::Replacing,
            "begin replace",
        )
    }

    /// Transition from REPLACING to IDLE
    pub fn finish_replace(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(
            CoordinatorState::Replacing,
            CoordinatorState::Idle,
            "finish replace",
        )
    }
}
