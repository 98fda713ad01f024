//! Player Tuning
//!
//! Every movement constant of the character controller. Speeds are in pixels
//! per fixed step, accelerations in pixels per step per second (they are
//! multiplied by `dt` before use), timers in seconds.

use serde::{Deserialize, Serialize};

/// How a dash treats horizontal speed the player already had.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashCarryRule {
    /// Compares the new dash X sign against itself, so the old X speed is
    /// never kept. Matches the shipped behaviour.
    #[default]
    Literal,
    /// Keeps the old X speed when it points the same way as the dash and is
    /// faster than it.
    CompareCurrentSign,
}

/// Movement constants for the player controller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    // Running
    /// Horizontal speed cap while running
    pub max_run_speed: f32,
    /// Ground acceleration toward the run speed
    pub run_acceleration: f32,
    /// Air acceleration toward the run speed
    pub fall_side_acceleration: f32,
    /// Acceleration multiplier when input opposes current motion
    pub direction_change_mult: f32,
    /// Ground deceleration with no input
    pub run_reduce: f32,
    /// Air deceleration with no input
    pub fly_reduce: f32,

    // Vertical
    pub gravity: f32,
    /// Terminal fall speed
    pub fall_speed: f32,
    /// Launch speed of a jump (negative = up)
    pub max_jump_speed: f32,
    /// Window after a jump during which holding Jump keeps the launch speed
    pub var_jump_time: f32,
    /// Grace period to still jump after walking off a ledge
    pub coyote_time: f32,

    // Walls
    /// Horizontal launch speed of a wall jump
    pub wall_jump_speed: f32,
    /// Lockout after a wall jump during which the wall cannot be re-grabbed
    pub wall_jump_time: f32,
    pub wall_climb_speed: f32,
    pub wall_slide_down_speed: f32,

    // Dash
    pub dash_speed: f32,
    /// Gravity suppression after a horizontal dash
    pub dash_time: f32,
    pub dash_carry_rule: DashCarryRule,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_run_speed: 2.0,
            run_acceleration: 10.0,
            fall_side_acceleration: 8.0,
            direction_change_mult: 1.6,
            run_reduce: 22.0,
            fly_reduce: 12.0,

            gravity: 13.0,
            fall_speed: 3.6,
            max_jump_speed: -3.0,
            var_jump_time: 0.1,
            coyote_time: 0.1,

            wall_jump_speed: 2.0,
            wall_jump_time: 0.15,
            wall_climb_speed: 1.0,
            wall_slide_down_speed: 1.5,

            dash_speed: 4.0,
            dash_time: 0.1,
            dash_carry_rule: DashCarryRule::Literal,
        }
    }
}
