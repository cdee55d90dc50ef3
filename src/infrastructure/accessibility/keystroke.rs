//! Keystroke accessibility backend for X11/Wayland desktops
//!
//! There is no portable focused-element API here, so the selection is read
//! from the PRIMARY selection and writes are pasted with simulated keys.

use std::thread;
use std::time::Duration;

use arboard::{GetExtLinux, LinuxClipboardKind};
use enigo::{Direction, Enigo, Key, Keyboard, Settings};

use crate::application::ports::{AccessibilityBackend, AttributeWriteError, FocusedElement};
use crate::domain::capture::TextRange;

/// Time given to the target application to read the clipboard after a paste
const PASTE_SETTLE: Duration = Duration::from_millis(150);

const SELECTION: &str = "selection";
const VALUE: &str = "value";

/// Focused element as seen through the selection and the keyboard
pub struct KeystrokeElement {
    selection: Option<String>,
}

impl KeystrokeElement {
    fn paste(&self, attribute: &'static str, text: &str, select_all: bool) -> Result<(), AttributeWriteError> {
        let fail = |reason: String| AttributeWriteError { attribute, reason };

        let mut clipboard = arboard::Clipboard::new().map_err(|e| fail(e.to_string()))?;
        let previous = clipboard.get_text().ok();
        clipboard.set_text(text).map_err(|e| fail(e.to_string()))?;

        let mut enigo = Enigo::new(&Settings::default()).map_err(|e| fail(e.to_string()))?;
        if select_all {
            chord(&mut enigo, 'a').map_err(fail)?;
        }
        chord(&mut enigo, 'v').map_err(fail)?;

        thread::sleep(PASTE_SETTLE);
        if let Some(previous) = previous {
            if let Err(e) = clipboard.set_text(previous) {
                tracing::debug!(error = %e, "could not restore clipboard");
            }
        }
        Ok(())
    }
}

/// Press Ctrl+`key`
fn chord(enigo: &mut Enigo, key: char) -> Result<(), String> {
    enigo
        .key(Key::Control, Direction::Press)
        .map_err(|e| e.to_string())?;
    let clicked = enigo.key(Key::Unicode(key), Direction::Click);
    enigo
        .key(Key::Control, Direction::Release)
        .map_err(|e| e.to_string())?;
    clicked.map_err(|e| e.to_string())
}

impl FocusedElement for KeystrokeElement {
    fn app_name(&self) -> String {
        String::new()
    }

    fn selected_text(&self) -> Option<String> {
        self.selection.clone()
    }

    fn value(&self) -> Option<String> {
        None
    }

    fn selected_range(&self) -> Option<TextRange> {
        None
    }

    fn set_selected_text(&self, text: &str) -> Result<(), AttributeWriteError> {
        self.paste(SELECTION, text, false)
    }

    fn set_value(&self, text: &str) -> Result<(), AttributeWriteError> {
        self.paste(VALUE, text, true)
    }
}

/// Accessibility backend driven by the PRIMARY selection and simulated keys
#[derive(Debug, Clone, Copy, Default)]
pub struct KeystrokeAccessibility;

impl KeystrokeAccessibility {
    pub fn new() -> Self {
        Self
    }
}

impl AccessibilityBackend for KeystrokeAccessibility {
    type Element = KeystrokeElement;

    fn is_trusted(&self) -> bool {
        true
    }

    fn focused_element(&self) -> Option<KeystrokeElement> {
        let mut clipboard = match arboard::Clipboard::new() {
            Ok(clipboard) => clipboard,
            Err(e) => {
                tracing::warn!(error = %e, "selection unavailable");
                return None;
            }
        };

        let selection = clipboard
            .get()
            .clipboard(LinuxClipboardKind::Primary)
            .text()
            .ok();

        Some(KeystrokeElement { selection })
    }
}
