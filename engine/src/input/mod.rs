//! Input Module
//!
//! Platform-agnostic keyboard and mouse state plus the logical game inputs
//! derived from them. Decoupled from any windowing system: the host feeds
//! events in, the fixed-step driver reads them and clears the edge flags once
//! per simulation step.
//!
//! # Example
//!
//! ```rust,ignore
//! use schnitzel_engine::input::{GameInputType, GameInputs, Input, KeyBindings, KeyCode};
//!
//! let mut input = Input::new();
//! let bindings = KeyBindings::new();
//! let mut game_inputs = GameInputs::new();
//!
//! input.keyboard.handle_key(KeyCode::Space, true);
//! game_inputs.update(&input.keyboard, &bindings, 1.0 / 60.0);
//! assert!(game_inputs.just_pressed(GameInputType::Jump));
//! input.clear_transitions();
//! ```

pub mod bindings;
pub mod game_input;
pub mod keyboard;
pub mod mouse;

pub use bindings::{GameInputType, KeyBindings};
pub use game_input::{GameInput, GameInputs, JUMP_BUFFER_TIME};
pub use keyboard::{KeyCode, KeyState, KeyboardState};
pub use mouse::{MouseButton, MouseState};

/// Raw input handed to the simulation by the host each frame.
#[derive(Debug, Clone, Default)]
pub struct Input {
    pub keyboard: KeyboardState,
    pub mouse: MouseState,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear single-step edge flags on every key and button.
    pub fn clear_transitions(&mut self) {
        self.keyboard.clear_transitions();
        self.mouse.clear_transitions();
    }

    /// Reset all input state to defaults.
    pub fn reset(&mut self) {
        self.keyboard.reset();
        self.mouse.reset();
    }
}
