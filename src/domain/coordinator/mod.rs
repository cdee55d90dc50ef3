//! Coordinator domain module

mod session;

pub use session::{CoordinatorSession, CoordinatorState, InvalidStateTransition};
