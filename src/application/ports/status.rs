//! Busy indicator port

/// Observes coordinator activity.
///
/// Purely informational: setting the indicator never blocks or locks.
pub trait StatusIndicator: Send + Sync {
    /// Called with `true` when a flow starts and `false` when it returns to idle
    fn set_busy(&self, busy: bool);
}

/// Indicator that ignores updates
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpStatusIndicator;

impl StatusIndicator for NoOpStatusIndicator {
    fn set_busy(&self, _busy: bool) {}
}
