//! Logical Game Inputs
//!
//! Collapses the raw keyboard state into one [`GameInput`] per
//! [`GameInputType`] at the start of every fixed step. Jump additionally
//! remembers a press for [`JUMP_BUFFER_TIME`] so pressing slightly before
//! landing still jumps.

use super::{GameInputType, KeyBindings, KeyboardState};

/// How long a jump press stays buffered, in seconds.
pub const JUMP_BUFFER_TIME: f32 = 0.125;

/// State of one logical input for the current step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GameInput {
    /// Any bound key is held
    pub is_down: bool,
    /// Any bound key went down this step
    pub just_pressed: bool,
    /// Any bound key went up this step
    pub just_released: bool,
    /// Seconds the last press stays usable (0 = nothing buffered)
    pub buffering_time: f32,
}

/// Buffer window per input. Only Jump buffers.
#[inline]
fn buffer_window(input: GameInputType) -> f32 {
    match input {
        GameInputType::Jump => JUMP_BUFFER_TIME,
        _ => 0.0,
    }
}

/// All logical inputs, indexed by [`GameInputType`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameInputs {
    inputs: [GameInput; GameInputType::COUNT],
}

impl GameInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh from raw key state. Called once at the start of a fixed step.
    ///
    /// Buffers decay by `dt` first, then a fresh press re-arms the window.
    pub fn update(&mut self, keyboard: &KeyboardState, bindings: &KeyBindings, dt: f32) {
        for action in GameInputType::ALL {
            let input = &mut self.inputs[action.index()];
            let keys = bindings.keys_for(action);

            input.is_down = keys.iter().any(|&k| keyboard.is_down(k));
            input.just_pressed = keys.iter().any(|&k| keyboard.just_pressed(k));
            input.just_released = keys.iter().any(|&k| keyboard.just_released(k));

            input.buffering_time = (input.buffering_time - dt).max(0.0);
            if input.just_pressed {
                input.buffering_time = buffer_window(action);
            }
        }
    }

    #[inline]
    pub fn get(&self, action: GameInputType) -> GameInput {
        self.inputs[action.index()]
    }

    #[inline]
    pub fn is_down(&self, action: GameInputType) -> bool {
        self.get(action).is_down
    }

    #[inline]
    pub fn just_pressed(&self, action: GameInputType) -> bool {
        self.get(action).just_pressed
    }

    #[inline]
    pub fn just_released(&self, action: GameInputType) -> bool {
        self.get(action).just_released
    }

    /// A press is still inside its buffer window.
    #[inline]
    pub fn is_buffered(&self, action: GameInputType) -> bool {
        self.get(action).buffering_time > 0.0
    }

    /// Use up a buffered press so it cannot fire twice.
    pub fn consume_buffer(&mut self, action: GameInputType) {
        self.inputs[action.index()].buffering_time = 0.0;
    }

    /// Overwrite one input directly (scripted drivers and tests).
    pub fn set(&mut self, action: GameInputType, input: GameInput) {
        self.inputs[action.index()] = input;
    }

    /// Horizontal axis from MoveLeft/MoveRight: -1, 0 or 1.
    pub fn axis_x(&self) -> i32 {
        self.is_down(GameInputType::MoveRight) as i32 - self.is_down(GameInputType::MoveLeft) as i32
    }

    /// Vertical axis from MoveUp/MoveDown (+1 = down): -1, 0 or 1.
    pub fn axis_y(&self) -> i32 {
        self.is_down(GameInputType::MoveDown) as i32 - self.is_down(GameInputType::MoveUp) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_any_bound_key_drives_action() {
        let bindings = KeyBindings::new();
        let mut kb = KeyboardState::new();
        let mut inputs = GameInputs::new();

        kb.handle_key(KeyCode::ArrowLeft, true);
        inputs.update(&kb, &bindings, DT);
        assert!(inputs.is_down(GameInputType::MoveLeft));
        assert!(inputs.just_pressed(GameInputType::MoveLeft));
        assert_eq!(inputs.axis_x(), -1);
    }

    #[test]
    fn test_opposing_directions_cancel() {
        let bindings = KeyBindings::new();
        let mut kb = KeyboardState::new();
        let mut inputs = GameInputs::new();

        kb.handle_key(KeyCode::A, true);
        kb.handle_key(KeyCode::D, true);
        inputs.update(&kb, &bindings, DT);
        assert_eq!(inputs.axis_x(), 0);
    }

    #[test]
    fn test_jump_buffer_expires() {
        let bindings = KeyBindings::new();
        let mut kb = KeyboardState::new();
        let mut inputs = GameInputs::new();

        kb.handle_key(KeyCode::Space, true);
        inputs.update(&kb, &bindings, DT);
        assert!(inputs.is_buffered(GameInputType::Jump));
        kb.clear_transitions();

        // 0.125 s is 7.5 steps; still buffered after 7, gone after 8
        for _ in 0..7 {
            inputs.update(&kb, &bindings, DT);
        }
        assert!(inputs.is_buffered(GameInputType::Jump));
        assert!(!inputs.just_pressed(GameInputType::Jump));
        inputs.update(&kb, &bindings, DT);
        assert!(!inputs.is_buffered(GameInputType::Jump));
    }

    #[test]
    fn test_consume_buffer() {
        let bindings = KeyBindings::new();
        let mut kb = KeyboardState::new();
        let mut inputs = GameInputs::new();

        kb.handle_key(KeyCode::Space, true);
        inputs.update(&kb, &bindings, DT);
        inputs.consume_buffer(GameInputType::Jump);
        assert!(!inputs.is_buffered(GameInputType::Jump));
    }

    #[test]
    fn test_dash_does_not_buffer() {
        let bindings = KeyBindings::new();
        let mut kb = KeyboardState::new();
        let mut inputs = GameInputs::new();

        kb.handle_key(KeyCode::X, true);
        inputs.update(&kb, &bindings, DT);
        assert!(inputs.just_pressed(GameInputType::Dash));
        assert!(!inputs.is_buffered(GameInputType::Dash));
    }
}
