//! Mouse Input Module
//!
//! Cursor position in both screen pixels and world pixels, plus button edges.
//! The world position is filled in by whoever owns the camera (see
//! [`Camera2D::screen_to_world`](crate::render::Camera2D::screen_to_world)).

use glam::Vec2;

use super::KeyState;

/// Mouse button identifiers, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    /// Additional mouse buttons (button 4, 5, etc.)
    Other(u16),
}

/// Complete mouse state tracking.
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseState {
    /// Cursor in window pixels, origin top-left
    pub screen_pos: Vec2,
    /// Cursor projected into world pixels
    pub world_pos: Vec2,
    pub left: KeyState,
    pub middle: KeyState,
    pub right: KeyState,
}

impl MouseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_position(&mut self, screen_pos: Vec2) {
        self.screen_pos = screen_pos;
    }

    pub fn set_button(&mut self, button: MouseButton, pressed: bool) {
        match button {
            MouseButton::Left => self.left.set(pressed),
            MouseButton::Middle => self.middle.set(pressed),
            MouseButton::Right => self.right.set(pressed),
            MouseButton::Other(_) => {} // Ignore extra buttons
        }
    }

    pub fn button(&self, button: MouseButton) -> KeyState {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Middle => self.middle,
            MouseButton::Right => self.right,
            MouseButton::Other(_) => KeyState::default(),
        }
    }

    pub fn clear_transitions(&mut self) {
        self.left.clear_transitions();
        self.middle.clear_transitions();
        self.right.clear_transitions();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
