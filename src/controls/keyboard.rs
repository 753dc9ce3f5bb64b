//! Held-key tracking.

use std::collections::HashSet;

/// Set of keys currently held down, keyed by physical key code
/// (`"KeyW"`, `"Space"`, ...).
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: HashSet<String>,
}

impl KeyboardState {
    /// Nothing pressed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key going down.
    pub fn press(&mut self, code: impl Into<String>) {
        self.pressed.insert(code.into());
    }

    /// Record a key going up.
    pub fn release(&mut self, code: &str) {
        self.pressed.remove(code);
    }

    /// Check whether a key is held.
    #[inline]
    pub fn is_pressed(&self, code: &str) -> bool {
        self.pressed.contains(code)
    }

    /// Check whether any key is held.
    #[inline]
    pub fn any_pressed(&self) -> bool {
        !self.pressed.is_empty()
    }

    /// Forget every held key, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release() {
        let mut keys = KeyboardState::new();
        keys.press("KeyW");
        keys.press("KeyW");
        assert!(keys.is_pressed("KeyW"));
        keys.release("KeyW");
        assert!(!keys.any_pressed());
    }
}
