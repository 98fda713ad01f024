//! Player State Machine
//!
//! One call to [`Player::update`] per fixed step, after the solids have moved.
//!
//! # Order of operations
//! 1. Death animation (while dying only gravity and movement run)
//! 2. Horizontal run
//! 3. Timers, ground jump, wall jump, variable jump height
//! 4. Dash
//! 5. Gravity
//! 6. Wall grab
//! 7. Move X, then Y; refresh coyote time; out-of-level check
//! 8. Animation state

use glam::{IVec2, Vec2};

use crate::audio::{SoundId, SoundQueue};
use crate::input::{GameInputType, GameInputs};
use crate::physics::{approach, sign};
use crate::render::RENDER_OPTION_FLIP_X;

use super::movement::{move_x, move_y};
use super::{AnimationState, DEATH_ANIM_TIME, Player};
use crate::game::collision::wall_contact;
use crate::game::config::{DashCarryRule, PlayerTuning};
use crate::game::level::Level;

/// Platform momentum multiplier when it would push against the current run.
const OPPOSING_CARRY_MULT: f32 = 0.5;
/// Platform momentum multiplier otherwise.
const ASSISTING_CARRY_MULT: f32 = 2.5;
/// Vertical platform speed multiplier added to a jump.
const VERTICAL_CARRY_MULT: f32 = 1.5;

/// Whether a dash keeps the X speed the player already had.
pub fn dash_keeps_previous_x(rule: DashCarryRule, previous_x: f32, dash_x: f32) -> bool {
    match rule {
        // The shipped comparison checks the dash sign against itself, so it
        // never differs and the old speed is never kept
        DashCarryRule::Literal => false,
        DashCarryRule::CompareCurrentSign => {
            sign(dash_x) != 0 && sign(previous_x) == sign(dash_x) && previous_x.abs() > dash_x.abs()
        }
    }
}

impl Player {
    /// Advance one fixed step.
    pub fn update(
        &mut self,
        inputs: &mut GameInputs,
        level: &Level,
        tuning: &PlayerTuning,
        sounds: &mut SoundQueue,
        dt: f32,
    ) {
        if !self.is_alive() {
            self.death_anim_timer += dt;
            if self.death_anim_timer >= DEATH_ANIM_TIME - dt * 0.5 {
                self.reset_to(level.spawn);
                tracing::info!("Player respawned at {:?}", level.spawn);
            } else {
                self.grabbing_wall = false;
                self.apply_gravity(tuning, dt);
                self.move_and_collide(level, tuning, sounds);
            }
            self.update_animation(dt);
            return;
        }

        self.update_run(inputs, tuning, dt);
        self.update_jump(inputs, level, tuning, sounds, dt);
        self.update_dash(inputs, tuning, sounds);
        self.apply_gravity(tuning, dt);
        self.update_wall_grab(inputs, level, tuning, dt);
        self.move_and_collide(level, tuning, sounds);
        self.update_animation(dt);
    }

    fn update_run(&mut self, inputs: &GameInputs, tuning: &PlayerTuning, dt: f32) {
        let dir = inputs.axis_x();
        if dir != 0 {
            let mut accel = if self.grounded {
                tuning.run_acceleration
            } else {
                tuning.fall_side_acceleration
            };
            if sign(self.speed.x) == -dir {
                accel *= tuning.direction_change_mult;
            }
            self.speed.x = approach(self.speed.x, dir as f32 * tuning.max_run_speed, accel * dt);
        } else {
            let reduce = if self.grounded {
                tuning.run_reduce
            } else {
                tuning.fly_reduce
            };
            self.speed.x = approach(self.speed.x, 0.0, reduce * dt);
        }

        match sign(self.speed.x) {
            1 => self.render_options &= !RENDER_OPTION_FLIP_X,
            -1 => self.render_options |= RENDER_OPTION_FLIP_X,
            _ => {}
        }
    }

    fn update_jump(
        &mut self,
        inputs: &mut GameInputs,
        level: &Level,
        tuning: &PlayerTuning,
        sounds: &mut SoundQueue,
        dt: f32,
    ) {
        self.var_jump_timer = (self.var_jump_timer - dt).max(0.0);
        self.wall_jump_timer = (self.wall_jump_timer - dt).max(0.0);
        self.dash_timer = (self.dash_timer - dt).max(0.0);
        self.coyote_timer = (self.coyote_timer - dt).max(0.0);

        let wants_jump =
            inputs.just_pressed(GameInputType::Jump) || inputs.is_buffered(GameInputType::Jump);

        if wants_jump && (self.grounded || self.coyote_timer > 0.0) {
            self.speed.y = tuning.max_jump_speed + self.solid_speed.y * VERTICAL_CARRY_MULT;

            let carry = self.solid_speed.x;
            let opposing = sign(carry) != 0 && sign(self.speed.x) == -sign(carry);
            let mult = if opposing {
                OPPOSING_CARRY_MULT
            } else {
                ASSISTING_CARRY_MULT
            };
            self.speed.x += carry * mult;

            self.grounded = false;
            self.coyote_timer = 0.0;
            self.var_jump_timer = tuning.var_jump_time;
            inputs.consume_buffer(GameInputType::Jump);
            sounds.play_sound(SoundId::Jump);
        } else if inputs.just_pressed(GameInputType::Jump) && !self.grounded {
            if let Some((side, _)) = wall_contact(self.rect(), &level.solids, &level.rooms) {
                self.speed.x = side.away() * tuning.wall_jump_speed;
                self.speed.y = tuning.max_jump_speed;
                self.wall_jump_timer = tuning.wall_jump_time;
                self.var_jump_timer = tuning.var_jump_time;
                self.grabbing_wall = false;
                inputs.consume_buffer(GameInputType::Jump);
                sounds.play_sound(SoundId::WallJump);
            }
        }

        if self.var_jump_timer > 0.0 {
            if inputs.is_down(GameInputType::Jump) {
                self.speed.y = self.speed.y.min(tuning.max_jump_speed);
            } else {
                self.var_jump_timer = 0.0;
            }
        }
    }

    fn update_dash(&mut self, inputs: &GameInputs, tuning: &PlayerTuning, sounds: &mut SoundQueue) {
        if !inputs.just_pressed(GameInputType::Dash) || self.dash_counter <= 0 {
            return;
        }

        self.speed.y = 0.0;
        let input = IVec2::new(inputs.axis_x(), inputs.axis_y());
        let dir = if input == IVec2::ZERO {
            Vec2::new(self.facing() as f32, 0.0)
        } else {
            input.as_vec2().normalize()
        };

        let mut dash = dir * tuning.dash_speed;
        if dash_keeps_previous_x(tuning.dash_carry_rule, self.speed.x, dash.x) {
            dash.x = self.speed.x;
        }
        self.speed = dash;

        if input.y == 0 {
            self.dash_timer = tuning.dash_time;
        }
        self.var_jump_timer = 0.0;
        self.dash_counter -= 1;
        sounds.play_sound(SoundId::Dash);
    }

    fn apply_gravity(&mut self, tuning: &PlayerTuning, dt: f32) {
        if self.grabbing_wall || self.dash_timer > 0.0 {
            return;
        }
        self.speed.y = approach(self.speed.y, tuning.fall_speed, tuning.gravity * dt);
    }

    fn update_wall_grab(&mut self, inputs: &GameInputs, level: &Level, tuning: &PlayerTuning, dt: f32) {
        self.grabbing_wall = false;
        if !inputs.is_down(GameInputType::WallGrab) || self.wall_jump_timer > 0.0 {
            return;
        }
        if wall_contact(self.rect(), &level.solids, &level.rooms).is_none() {
            return;
        }

        self.speed.x = 0.0;
        self.grabbing_wall = true;

        let dir = inputs.axis_y();
        if dir != 0 {
            let target = if dir < 0 {
                -tuning.wall_climb_speed
            } else {
                tuning.wall_slide_down_speed
            };
            let mut accel = tuning.run_acceleration;
            if sign(self.speed.y) == -dir {
                accel *= tuning.direction_change_mult;
            }
            self.speed.y = approach(self.speed.y, target, accel * dt);
        } else {
            self.speed.y = approach(self.speed.y, 0.0, tuning.run_reduce * dt);
        }
    }

    fn move_and_collide(&mut self, level: &Level, tuning: &PlayerTuning, sounds: &mut SoundQueue) {
        let was_alive = self.is_alive();

        move_x(self, &level.solids, &level.rooms, tuning.dash_speed);
        if was_alive && !self.is_alive() {
            sounds.play_sound(SoundId::Death);
            return;
        }

        move_y(self, &level.solids, &level.rooms, tuning.dash_speed);
        if was_alive && !self.is_alive() {
            sounds.play_sound(SoundId::Death);
            return;
        }

        if self.grounded {
            self.coyote_timer = tuning.coyote_time;
        }

        if self.is_alive() && self.pos.y >= level.rooms.height_px() {
            tracing::info!("Player fell out of the level at {:?}", self.pos);
            self.kill(Vec2::ZERO);
            sounds.play_sound(SoundId::Death);
        }
    }

    fn update_animation(&mut self, dt: f32) {
        self.animation_state = if !self.is_alive() {
            AnimationState::Death
        } else if self.grabbing_wall {
            AnimationState::WallGrab
        } else if !self.grounded {
            AnimationState::Jump
        } else if self.speed.x != 0.0 {
            AnimationState::Run
        } else {
            AnimationState::Idle
        };

        if self.animation_state == AnimationState::Run {
            self.run_anim_time += dt;
        } else {
            self.run_anim_time = 0.0;
        }
    }
}
