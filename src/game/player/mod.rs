//! Player Module
//!
//! The player body and its state machine. The body is an 8x16 integer hitbox
//! (`pos` is its top-left) driven by a float `speed` in pixels per fixed step.
//! All fractional motion lives in `remainder`, so `pos` only ever moves by
//! whole pixels.
//!
//! - [`controller`] - the per-step state machine (run, jump, dash, grab, gravity)
//! - [`movement`] - pixel-stepped X/Y resolution against the level

pub mod controller;
pub mod movement;

use glam::{IVec2, Vec2};

use crate::physics::IRect;
use crate::render::RENDER_OPTION_FLIP_X;

/// Hitbox size in pixels.
pub const PLAYER_SIZE: IVec2 = IVec2::new(8, 16);

/// Length of the death animation; `death_anim_timer == DEATH_ANIM_TIME` means alive.
pub const DEATH_ANIM_TIME: f32 = 0.5;

/// Presentation state, derived once per step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnimationState {
    #[default]
    Idle,
    Run,
    Jump,
    WallGrab,
    Death,
}

/// The player character.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: IVec2,
    pub prev_pos: IVec2,
    /// Pixels per fixed step
    pub speed: Vec2,
    pub remainder: Vec2,
    /// Pixels moved by solids this step
    pub solid_speed: Vec2,

    pub grounded: bool,
    pub grabbing_wall: bool,

    // Countdown timers, seconds
    pub var_jump_timer: f32,
    pub wall_jump_timer: f32,
    pub dash_timer: f32,
    pub coyote_timer: f32,

    pub dash_counter: i32,
    /// Counts up from 0 while dying; equals [`DEATH_ANIM_TIME`] when alive
    pub death_anim_timer: f32,

    pub animation_state: AnimationState,
    pub render_options: u32,
    pub run_anim_time: f32,

    /// Lifetime death count (statistics only)
    pub deaths: u32,
}

impl Player {
    /// A fresh, alive player standing at `spawn`.
    pub fn new(spawn: IVec2) -> Self {
        Self {
            pos: spawn,
            prev_pos: spawn,
            speed: Vec2::ZERO,
            remainder: Vec2::ZERO,
            solid_speed: Vec2::ZERO,
            grounded: false,
            grabbing_wall: false,
            var_jump_timer: 0.0,
            wall_jump_timer: 0.0,
            dash_timer: 0.0,
            coyote_timer: 0.0,
            dash_counter: 1,
            death_anim_timer: DEATH_ANIM_TIME,
            animation_state: AnimationState::Idle,
            render_options: 0,
            run_anim_time: 0.0,
            deaths: 0,
        }
    }

    #[inline]
    pub fn rect(&self) -> IRect {
        IRect::new(self.pos, PLAYER_SIZE)
    }

    /// Centre of the hitbox in world pixels.
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos.as_vec2() + PLAYER_SIZE.as_vec2() * 0.5
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.death_anim_timer >= DEATH_ANIM_TIME
    }

    /// Horizontal facing: -1 when the sprite is flipped, else 1.
    #[inline]
    pub fn facing(&self) -> i32 {
        if self.render_options & RENDER_OPTION_FLIP_X != 0 {
            -1
        } else {
            1
        }
    }

    /// Start the death animation and fling the body along `knockback`.
    pub fn kill(&mut self, knockback: Vec2) {
        self.death_anim_timer = 0.0;
        self.speed = knockback;
        self.grabbing_wall = false;
        self.dash_timer = 0.0;
        self.var_jump_timer = 0.0;
        self.deaths += 1;
        tracing::debug!(pos = ?self.pos, "Player died");
    }

    /// Teleport to `spawn` with all motion cleared. Keeps lifetime stats.
    pub fn reset_to(&mut self, spawn: IVec2) {
        let deaths = self.deaths;
        let render_options = self.render_options;
        *self = Self::new(spawn);
        self.deaths = deaths;
        self.render_options = render_options;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_is_alive() {
        let player = Player::new(IVec2::new(16, 32));
        assert!(player.is_alive());
        assert_eq!(player.dash_counter, 1);
        assert_eq!(player.rect().size, PLAYER_SIZE);
    }

    #[test]
    fn test_kill_and_reset() {
        let mut player = Player::new(IVec2::ZERO);
        player.kill(Vec2::new(0.0, -4.0));
        assert!(!player.is_alive());
        assert_eq!(player.speed, Vec2::new(0.0, -4.0));

        player.reset_to(IVec2::new(5, 5));
        assert!(player.is_alive());
        assert_eq!(player.pos, IVec2::new(5, 5));
        assert_eq!(player.prev_pos, IVec2::new(5, 5));
        assert_eq!(player.speed, Vec2::ZERO);
        assert_eq!(player.deaths, 1);
    }

    #[test]
    fn test_facing_follows_flip() {
        let mut player = Player::new(IVec2::ZERO);
        assert_eq!(player.facing(), 1);
        player.render_options |= RENDER_OPTION_FLIP_X;
        assert_eq!(player.facing(), -1);
    }
}
