//! Keyboard Input Module
//!
//! Per-key edge tracking. Decoupled from any windowing system: the host maps
//! its native key events onto [`KeyCode`] and calls
//! [`KeyboardState::handle_key`].
//!
//! Edge flags (`just_pressed`, `just_released`, `half_transition_count`) are
//! cleared by the fixed-step driver once per simulation step, never per
//! rendered frame.

use std::collections::HashMap;

/// Generic key codes, independent of the windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Letters used by the default bindings
    A,
    C,
    D,
    J,
    K,
    L,
    S,
    W,
    X,
    Z,

    Space,
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Function keys (editor save / load)
    F5,
    F9,

    Escape,
    Enter,

    /// Catch-all for unhandled keys
    Unknown,
}

/// Edge state of one physical key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub is_down: bool,
    /// Went down since the last clear
    pub just_pressed: bool,
    /// Went up since the last clear
    pub just_released: bool,
    /// Number of down/up flips since the last clear
    pub half_transition_count: u8,
}

impl KeyState {
    /// Apply a press or release event.
    ///
    /// Repeated events in the same direction (OS key repeat) are ignored.
    pub fn set(&mut self, pressed: bool) {
        if self.is_down == pressed {
            return;
        }
        self.is_down = pressed;
        self.half_transition_count = self.half_transition_count.saturating_add(1);
        if pressed {
            self.just_pressed = true;
        } else {
            self.just_released = true;
        }
    }

    /// Drop the single-step edge flags, keeping `is_down`.
    #[inline]
    pub fn clear_transitions(&mut self) {
        self.just_pressed = false;
        self.just_released = false;
        self.half_transition_count = 0;
    }
}

/// State of every key that has been seen at least once.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    keys: HashMap<KeyCode, KeyState>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key event from the host.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if key == KeyCode::Unknown {
            return;
        }
        self.keys.entry(key).or_default().set(pressed);
    }

    /// Current state of `key` (all false if it was never touched).
    #[inline]
    pub fn key(&self, key: KeyCode) -> KeyState {
        self.keys.get(&key).copied().unwrap_or_default()
    }

    #[inline]
    pub fn is_down(&self, key: KeyCode) -> bool {
        self.key(key).is_down
    }

    #[inline]
    pub fn just_pressed(&self, key: KeyCode) -> bool {
        self.key(key).just_pressed
    }

    #[inline]
    pub fn just_released(&self, key: KeyCode) -> bool {
        self.key(key).just_released
    }

    /// Either shift key held.
    pub fn shift_down(&self) -> bool {
        self.is_down(KeyCode::ShiftLeft) || self.is_down(KeyCode::ShiftRight)
    }

    pub fn clear_transitions(&mut self) {
        for state in self.keys.values_mut() {
            state.clear_transitions();
        }
    }

    /// Release every key and drop all edges.
    pub fn reset(&mut self) {
        self.keys.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_sets_edges() {
        let mut kb = KeyboardState::new();
        kb.handle_key(KeyCode::Space, true);
        assert!(kb.is_down(KeyCode::Space));
        assert!(kb.just_pressed(KeyCode::Space));
        assert!(!kb.just_released(KeyCode::Space));
        assert_eq!(kb.key(KeyCode::Space).half_transition_count, 1);
    }

    #[test]
    fn test_key_repeat_is_not_a_new_press() {
        let mut kb = KeyboardState::new();
        kb.handle_key(KeyCode::Space, true);
        kb.clear_transitions();
        kb.handle_key(KeyCode::Space, true);
        assert!(kb.is_down(KeyCode::Space));
        assert!(!kb.just_pressed(KeyCode::Space));
    }

    #[test]
    fn test_tap_within_one_step() {
        let mut kb = KeyboardState::new();
        kb.handle_key(KeyCode::X, true);
        kb.handle_key(KeyCode::X, false);
        let state = kb.key(KeyCode::X);
        assert!(!state.is_down);
        assert!(state.just_pressed);
        assert!(state.just_released);
        assert_eq!(state.half_transition_count, 2);
    }

    #[test]
    fn test_clear_keeps_is_down() {
        let mut kb = KeyboardState::new();
        kb.handle_key(KeyCode::A, true);
        kb.clear_transitions();
        assert!(kb.is_down(KeyCode::A));
        assert_eq!(kb.key(KeyCode::A).half_transition_count, 0);
        assert!(!kb.just_pressed(KeyCode::A));
    }

    #[test]
    fn test_untouched_key_is_up() {
        let kb = KeyboardState::new();
        assert_eq!(kb.key(KeyCode::F5), KeyState::default());
    }
}
