//! Clipboard infrastructure module

mod arboard;

pub use arboard::ArboardClipboard;

use crate::application::ports::Clipboard;

/// Create the clipboard adapter used for copy actions and replace fallback
pub fn create_clipboard() -> Box<dyn Clipboard> {
    Box::new(ArboardClipboard::new())
}
