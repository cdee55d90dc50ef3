//! Global hotkey adapters

mod global_hotkey;

pub use self::global_hotkey::{translate, validate_accelerator, HotkeyDispatcher, HotkeyError};
