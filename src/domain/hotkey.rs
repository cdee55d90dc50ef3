//! Hotkey commands and bindings

use std::fmt;

/// Default accelerator for the analyze command
pub const DEFAULT_ANALYZE_HOTKEY: &str = "CmdOrCtrl+Slash";

/// Default accelerator for the replace command
pub const DEFAULT_REPLACE_HOTKEY: &str = "CmdOrCtrl+Period";

/// Abstract commands produced by the global shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HotkeyCommand {
    Analyze,
    Replace,
}

impl HotkeyCommand {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Analyze => "analyze",
            Self::Replace => "replace",
        }
    }
}

impl fmt::Display for HotkeyCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A registered key combination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotkeyBinding {
    /// Identifier assigned by the OS hotkey layer
    pub id: u32,
    /// Accelerator string, e.g. `CmdOrCtrl+Slash`
    pub accelerator: String,
    pub command: HotkeyCommand,
}

/// Translates native hotkey identifiers into commands
#[derive(Debug, Clone, Default)]
pub struct HotkeyMap {
    bindings: Vec<HotkeyBinding>,
}

impl HotkeyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding; a later binding for the same id replaces the earlier one
    pub fn insert(&mut self, binding: HotkeyBinding) {
        self.bindings.retain(|b| b.id != binding.id);
        self.bindings.push(binding);
    }

    pub fn command_for(&self, id: u32) -> Option<HotkeyCommand> {
        self.bindings
            .iter()
            .find(|b| b.id == id)
            .map(|b| b.command)
    }

    /// Whether a command has a live binding
    pub fn is_bound(&self, command: HotkeyCommand) -> bool {
        self.bindings.iter().any(|b| b.command == command)
    }

    pub fn bindings(&self) -> &[HotkeyBinding] {
        &self.bindings
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding(id: u32, command: HotkeyCommand) -> HotkeyBinding {
        HotkeyBinding {
            id,
            accelerator: format!("key-{}", id),
            command,
        }
    }

    #[test]
    fn translates_known_ids() {
        let mut map = HotkeyMap::new();
        map.insert(binding(7, HotkeyCommand::Analyze));
        map.insert(binding(9, HotkeyCommand::Replace));

        assert_eq!(map.command_for(7), Some(HotkeyCommand::Analyze));
        assert_eq!(map.command_for(9), Some(HotkeyCommand::Replace));
        assert_eq!(map.command_for(8), None);
    }

    #[test]
    fn missing_binding_is_unbound() {
        let mut map = HotkeyMap::new();
        map.insert(binding(1, HotkeyCommand::Analyze));

        assert!(map.is_bound(HotkeyCommand::Analyze));
        assert!(!map.is_bound(HotkeyCommand::Replace));
    }

    #[test]
    fn reinserting_id_replaces_binding() {
        let mut map = HotkeyMap::new();
        map.insert(binding(1, HotkeyCommand::Analyze));
        map.insert(binding(1, HotkeyCommand::Replace));

        assert_eq!(map.bindings().len(), 1);
        assert_eq!(map.command_for(1), Some(HotkeyCommand::Replace));
    }

    #[test]
    fn command_display() {
        assert_eq!(HotkeyCommand::Analyze.to_string(), "analyze");
        assert_eq!(HotkeyCommand::Replace.to_string(), "replace");
    }
}
