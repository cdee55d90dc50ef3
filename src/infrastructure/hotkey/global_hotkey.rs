//! Global shortcut registration using global-hotkey

use global_hotkey::hotkey::HotKey;
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::domain::hotkey::{HotkeyBinding, HotkeyCommand, HotkeyMap};

/// Hotkey registration errors
#[derive(Debug, Clone, Error)]
pub enum HotkeyError {
    #[error("Global hotkeys unavailable: {0}")]
    ManagerUnavailable(String),

    #[error("Invalid accelerator \"{accelerator}\": {reason}")]
    InvalidAccelerator { accelerator: String, reason: String },

    #[error("Failed to register {accelerator}: {reason}")]
    RegisterFailed { accelerator: String, reason: String },
}

/// Translate a native event into a command. Only key presses count.
pub fn translate(map: &HotkeyMap, id: u32, state: HotKeyState) -> Option<HotkeyCommand> {
    match state {
        HotKeyState::Pressed => map.command_for(id),
        HotKeyState::Released => None,
    }
}

fn parse(accelerator: &str) -> Result<HotKey, HotkeyError> {
    accelerator
        .parse::<HotKey>()
        .map_err(|e| HotkeyError::InvalidAccelerator {
            accelerator: accelerator.to_string(),
            reason: e.to_string(),
        })
}

/// Check that an accelerator string names a valid key combination
pub fn validate_accelerator(accelerator: &str) -> Result<(), HotkeyError> {
    parse(accelerator).map(|_| ())
}

/// Holds the global shortcuts for the process lifetime.
///
/// Dropping the dispatcher unregisters every shortcut and detaches the
/// event handler.
pub struct HotkeyDispatcher {
    manager: GlobalHotKeyManager,
    registered: Vec<HotKey>,
    map: HotkeyMap,
}

impl HotkeyDispatcher {
    /// Register the given bindings and forward presses into `tx`.
    ///
    /// A binding that fails to register is logged and left unbound; the
    /// others stay active. On macOS this must run on the main thread.
    pub fn register<T>(
        bindings: &[(HotkeyCommand, &str)],
        tx: mpsc::Sender<T>,
    ) -> Result<Self, HotkeyError>
    where
        T: From<HotkeyCommand> + Send + 'static,
    {
        let manager = GlobalHotKeyManager::new()
            .map_err(|e| HotkeyError::ManagerUnavailable(e.to_string()))?;

        let mut registered = Vec::new();
        let mut map = HotkeyMap::new();

        for (command, accelerator) in bindings {
            let result = parse(accelerator).and_then(|hotkey| {
                manager
                    .register(hotkey)
                    .map(|()| hotkey)
                    .map_err(|e| HotkeyError::RegisterFailed {
                        accelerator: accelerator.to_string(),
                        reason: e.to_string(),
                    })
            });

            match result {
                Ok(hotkey) => {
                    tracing::info!(command = %command, accelerator, "registered hotkey");
                    map.insert(HotkeyBinding {
                        id: hotkey.id(),
                        accelerator: accelerator.to_string(),
                        command: *command,
                    });
                    registered.push(hotkey);
                }
                Err(e) => {
                    tracing::warn!(command = %command, error = %e, "hotkey unavailable");
                }
            }
        }

        let handler_map = map.clone();
        GlobalHotKeyEvent::set_event_handler(Some(move |event: GlobalHotKeyEvent| {
            if let Some(command) = translate(&handler_map, event.id, event.state) {
                if tx.try_send(T::from(command)).is_err() {
                    tracing::warn!(command = %command, "command queue full, dropping hotkey");
                }
            }
        }));

        Ok(Self {
            manager,
            registered,
            map,
        })
    }

    /// Live bindings
    pub fn map(&self) -> &HotkeyMap {
        &self.map
    }
}

impl Drop for HotkeyDispatcher {
    fn drop(&mut self) {
        GlobalHotKeyEvent::set_event_handler(None::<fn(GlobalHotKeyEvent)>);

        for hotkey in self.registered.drain(..) {
            if let Err(e) = self.manager.unregister(hotkey) {
                tracing::warn!(error = %e, "failed to unregister hotkey");
            }
        }
        tracing::debug!("hotkeys released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_accelerators_parse() {
        assert!(parse("CmdOrCtrl+Slash").is_ok());
        assert!(parse("CmdOrCtrl+Period").is_ok());
    }

    #[test]
    fn invalid_accelerator_is_reported() {
        let err = parse("Ctrl+Nope").unwrap_err();
        assert!(matches!(err, HotkeyError::InvalidAccelerator { .. }));
        assert!(err.to_string().contains("Ctrl+Nope"));
    }

    #[test]
    fn only_presses_translate() {
        let analyze = parse("CmdOrCtrl+Slash").unwrap();
        let mut map = HotkeyMap::new();
        map.insert(HotkeyBinding {
            id: analyze.id(),
            accelerator: "CmdOrCtrl+Slash".to_string(),
            command: HotkeyCommand::Analyze,
        });

        assert_eq!(
            translate(&map, analyze.id(), HotKeyState::Pressed),
            Some(HotkeyCommand::Analyze)
        );
        assert_eq!(translate(&map, analyze.id(), HotKeyState::Released), None);
        assert_eq!(translate(&map, analyze.id().wrapping_add(1), HotKeyState::Pressed), None);
    }
}
