//! Keyboard shortcut registry.

use crate::event_handler::HostEvent;

/// What a shortcut triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Save,
    NewNote,
    Archive,
    ToggleToolPicker,
    PencilDoubleTap,
    Share,
}

impl ShortcutAction {
    pub fn to_event(self) -> HostEvent {
        match self {
            ShortcutAction::Save => HostEvent::Save,
            ShortcutAction::NewNote => HostEvent::NewNote,
            ShortcutAction::Archive => HostEvent::Archive,
            ShortcutAction::ToggleToolPicker => HostEvent::ToggleToolPicker,
            ShortcutAction::PencilDoubleTap => HostEvent::PencilDoubleTap,
            ShortcutAction::Share => HostEvent::Share,
        }
    }
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub action: ShortcutAction,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        action: ShortcutAction,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            action,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+S").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    fn matches(&self, key: &str, ctrl: bool, shift: bool) -> bool {
        self.key.eq_ignore_ascii_case(key) && self.ctrl == ctrl && self.shift == shift
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("S", true, false, ShortcutAction::Save, "Save note"),
            Shortcut::new("N", true, false, ShortcutAction::NewNote, "New note"),
            Shortcut::new("Backspace", true, false, ShortcutAction::Archive, "Archive note"),
            Shortcut::new(
                "P",
                true,
                false,
                ShortcutAction::ToggleToolPicker,
                "Show/hide tool picker",
            ),
            Shortcut::new(
                "Space",
                false,
                true,
                ShortcutAction::PencilDoubleTap,
                "Pencil double-tap",
            ),
            Shortcut::new("E", true, true, ShortcutAction::Share, "Share note"),
        ]
    }

    /// Find the shortcut bound to a key combination.
    pub fn lookup(key: &str, ctrl: bool, shift: bool) -> Option<Shortcut> {
        Self::all().into_iter().find(|s| s.matches(key, ctrl, shift))
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:20} {}", shortcut.format(), shortcut.description);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let shortcut = ShortcutRegistry::lookup("s", true, false).unwrap();
        assert_eq!(shortcut.action, ShortcutAction::Save);
    }

    #[test]
    fn test_modifiers_must_match() {
        assert!(ShortcutRegistry::lookup("S", false, false).is_none());
        assert!(ShortcutRegistry::lookup("E", true, false).is_none());
    }

    #[test]
    fn test_format() {
        let shortcut = ShortcutRegistry::lookup("E", true, true).unwrap();
        assert_eq!(shortcut.format(), "Ctrl+Shift+E");
    }

    #[test]
    fn test_no_duplicate_bindings() {
        let all = ShortcutRegistry::all();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert!(!b.matches(a.key, a.ctrl, a.shift), "{} bound twice", a.format());
            }
        }
    }
}
