//! Keyboard mapping
//!
//! Key handlers only ever write a literal true/false into one flag, so the
//! frame callback can read them without coordination.

use crate::sim::InputState;

/// Key identifiers (as reported by `KeyboardEvent.key`) for each direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    pub up: String,
    pub down: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            up: "w".to_string(),
            down: "s".to_string(),
        }
    }
}

impl KeyBindings {
    /// Apply a key press or release. Returns false for unbound keys.
    pub fn apply(&self, input: &mut InputState, key: &str, pressed: bool) -> bool {
        if key == self.up {
            input.move_up = pressed;
            true
        } else if key == self.down {
            input.move_down = pressed;
            true
        } else {
            false
        }
    }
}
