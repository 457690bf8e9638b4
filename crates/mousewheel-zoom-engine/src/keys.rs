use serde::{Deserialize, Serialize};

/// Physical key that must be held for scrolling to resize images.
///
/// Serialised by its key code so settings files read like host key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ModifierKey {
    #[default]
    AltLeft,
    ControlLeft,
    ShiftLeft,
    AltRight,
    ControlRight,
    ShiftRight,
}

impl ModifierKey {
    pub fn code(self) -> &'static str {
        match self {
            Self::AltLeft => "AltLeft",
            Self::ControlLeft => "ControlLeft",
            Self::ShiftLeft => "ShiftLeft",
            Self::AltRight => "AltRight",
            Self::ControlRight => "ControlRight",
            Self::ShiftRight => "ShiftRight",
        }
    }

    /// Whether the live modifier state reported with an event includes this key.
    pub fn is_down(self, modifiers: Modifiers) -> bool {
        match self {
            Self::AltLeft | Self::AltRight => modifiers.alt,
            Self::ControlLeft | Self::ControlRight => modifiers.ctrl,
            Self::ShiftLeft | Self::ShiftRight => modifiers.shift,
        }
    }
}

/// Modifier state carried by a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
}

/// Tracks whether the configured modifier key is held.
#[derive(Debug, Clone)]
pub struct KeyTracker {
    key: ModifierKey,
    held: bool,
}

impl KeyTracker {
    pub fn new(key: ModifierKey) -> Self {
        Self { key, held: false }
    }

    pub fn key_down(&mut self, code: &str) {
        if code == self.key.code() {
            self.held = true;
        }
    }

    pub fn key_up(&mut self, code: &str) {
        if code == self.key.code() {
            self.held = false;
        }
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Whether a wheel event should resize.
    ///
    /// A key released while the window lacked focus (alt-tab) never sends a
    /// key-up, so the event's own modifier state has the final say.
    pub fn confirm(&mut self, modifiers: Modifiers) -> bool {
        if !self.held {
            return false;
        }
        if !self.key.is_down(modifiers) {
            log::debug!("{} no longer held, resetting", self.key.code());
            self.held = false;
            return false;
        }
        true
    }
}
