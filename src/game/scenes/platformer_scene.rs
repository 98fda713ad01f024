//! Platformer Scene
//!
//! Owns the whole simulation (level, player, input mapping, camera, sound
//! queue, editor) and drives it with a fixed timestep. The host calls
//! [`update_frame`](PlatformerScene::update_frame) once per displayed frame
//! and [`draw`](PlatformerScene::draw) right after.

use glam::{IVec2, Vec2};

use crate::audio::{SoundId, SoundQueue};
use crate::input::{GameInputs, Input, KeyBindings};
use crate::physics::lerp_ivec2;
use crate::render::{
    Camera2D, DrawList, DrawOptions, SpriteId, autotile_atlas_offset, get_sprite,
};
use crate::world::{TILE_SIZE, TileLayer, TileType, room_bounds};

use crate::game::config::GameConfig;
use crate::game::editor::{EditorAction, LevelEditor};
use crate::game::level::Level;
use crate::game::player::{AnimationState, DEATH_ANIM_TIME, PLAYER_SIZE, Player};
use crate::game::solids::update_solids;

/// Length of one simulation step, seconds.
pub const UPDATE_DELAY: f64 = 1.0 / 60.0;

/// Slack when comparing the accumulator against [`UPDATE_DELAY`], so frame
/// times that sum to one step in float arithmetic still produce that step.
const STEP_EPSILON: f64 = 1e-6;

/// Run animation frames per second.
const RUN_ANIM_FPS: f32 = 12.0;

/// Complete platformer session.
pub struct PlatformerScene {
    // -- Config --
    pub config: GameConfig,

    // -- World --
    pub level: Level,
    pub player: Player,

    // -- Input / output seams --
    pub game_inputs: GameInputs,
    pub bindings: KeyBindings,
    sounds: SoundQueue,
    pub camera: Camera2D,
    pub editor: LevelEditor,

    // -- Fixed-step driver --
    update_timer: f64,
    interpolation: f32,
    steps_run: u64,

    /// Window size in pixels, for mouse projection
    pub screen_size: Vec2,
}

impl PlatformerScene {
    /// Load the configured level (or build the default one) and spawn the
    /// player.
    pub fn new(config: GameConfig) -> Self {
        let level = Level::load_or_default(&config.level_path);
        Self::with_level(config, level)
    }

    /// Start a session on an already built level.
    pub fn with_level(config: GameConfig, level: Level) -> Self {
        let player = Player::new(level.spawn);
        let editor = LevelEditor::new(config.editor_enabled, config.level_path.clone());
        let mut camera = Camera2D::default();
        camera.follow(player.center().y, level.rooms.len());
        let screen_size = camera.dimensions;

        Self {
            config,
            level,
            player,
            game_inputs: GameInputs::new(),
            bindings: KeyBindings::new(),
            sounds: SoundQueue::new(),
            camera,
            editor,
            update_timer: 0.0,
            interpolation: 0.0,
            steps_run: 0,
            screen_size,
        }
    }

    /// Advance the simulation by one displayed frame.
    ///
    /// Runs as many fixed steps as the accumulated time allows (at most
    /// `max_steps_per_frame`), clearing the raw input edge flags after each.
    /// Returns the number of steps run.
    pub fn update_frame(&mut self, frame_time: f32, input: &mut Input) -> u32 {
        let frame_time = if frame_time.is_finite() && frame_time > 0.0 {
            frame_time as f64
        } else {
            0.0
        };
        self.update_timer += frame_time;

        let max_steps = self.config.simulation.max_steps_per_frame.max(1);
        let cap = UPDATE_DELAY * max_steps as f64;
        if self.update_timer > cap + STEP_EPSILON {
            tracing::debug!(
                "Simulation behind, dropping {:.1} ms of backlog",
                (self.update_timer - cap) * 1000.0
            );
            self.update_timer = cap;
        }

        let mut steps = 0;
        while self.update_timer + STEP_EPSILON >= UPDATE_DELAY {
            self.update_timer -= UPDATE_DELAY;
            self.step(input);
            input.clear_transitions();
            steps += 1;
        }
        self.update_timer = self.update_timer.max(0.0);
        self.interpolation = ((self.update_timer / UPDATE_DELAY) as f32).clamp(0.0, 1.0);

        steps
    }

    /// One fixed simulation step.
    ///
    /// # Order of operations
    /// 1. Editor (mouse painting, save/load)
    /// 2. Game inputs from raw keys
    /// 3. Solids (push / carry the player)
    /// 4. Player state machine
    /// 5. Camera room framing
    pub fn step(&mut self, input: &mut Input) {
        let dt = UPDATE_DELAY as f32;

        // 1. Editor
        input.mouse.world_pos = self
            .camera
            .screen_to_world(input.mouse.screen_pos, self.screen_size);
        if self.editor.apply(input, &mut self.level) == EditorAction::Reloaded {
            self.player.reset_to(self.level.spawn);
        }

        // 2. Inputs
        self.game_inputs.update(&input.keyboard, &self.bindings, dt);

        // 3. Solids
        self.player.prev_pos = self.player.pos;
        update_solids(
            &mut self.level.solids,
            &mut self.player,
            &self.level.rooms,
            self.level.spawn,
            dt,
        );

        // 4. Player
        self.player.update(
            &mut self.game_inputs,
            &self.level,
            &self.config.physics,
            &mut self.sounds,
            dt,
        );

        // 5. Camera
        self.camera
            .follow(self.player.center().y, self.level.rooms.len());

        self.steps_run += 1;
    }

    /// Rebuild `list` for the current frame.
    ///
    /// Draw order: background tiles, foreground tiles, solids, player. Only
    /// the framed room's tiles are emitted.
    pub fn draw(&self, list: &mut DrawList) {
        list.clear();
        list.camera = self.camera;

        let room_index = self.camera.room_index;
        if let Some(room) = self.level.rooms.room(room_index) {
            let origin = room_bounds(room_index).pos;
            for layer in [TileLayer::Background, TileLayer::Foreground] {
                for (x, y, tile) in room.layer(layer).iter() {
                    let pos = (origin + IVec2::new(x, y) * TILE_SIZE).as_vec2();
                    match tile.kind {
                        TileType::None => {}
                        TileType::Solid => list.draw_atlas(
                            autotile_atlas_offset(tile.neighbour_mask),
                            IVec2::splat(TILE_SIZE),
                            pos,
                        ),
                        TileType::Spike => {
                            list.draw_sprite(SpriteId::Spike, pos, DrawOptions::default())
                        }
                    }
                }
            }
        }

        for solid in &self.level.solids {
            let pos = lerp_ivec2(solid.prev_pos, solid.pos, self.interpolation);
            list.draw_sprite(
                solid.sprite_id,
                pos,
                DrawOptions {
                    size: Some(solid.size.as_vec2()),
                    ..Default::default()
                },
            );
        }

        self.draw_player(list);
    }

    fn draw_player(&self, list: &mut DrawList) {
        let player = &self.player;
        let (sprite_id, animation_idx) = match player.animation_state {
            AnimationState::Idle => (SpriteId::PlayerIdle, 0),
            AnimationState::Run => (
                SpriteId::PlayerRun,
                (player.run_anim_time * RUN_ANIM_FPS) as u32,
            ),
            AnimationState::Jump | AnimationState::WallGrab => (SpriteId::PlayerJump, 0),
            AnimationState::Death => {
                let frames = get_sprite(SpriteId::PlayerDeath).frame_count;
                let t = (player.death_anim_timer / DEATH_ANIM_TIME).clamp(0.0, 1.0);
                (
                    SpriteId::PlayerDeath,
                    ((t * frames as f32) as u32).min(frames.saturating_sub(1)),
                )
            }
        };

        // Sprite is wider and taller than the hitbox: align bottom centre
        let sprite = get_sprite(sprite_id);
        let offset = Vec2::new(
            (PLAYER_SIZE.x - sprite.size.x) as f32 * 0.5,
            (PLAYER_SIZE.y - sprite.size.y) as f32,
        );
        let pos = lerp_ivec2(player.prev_pos, player.pos, self.interpolation) + offset;
        list.draw_sprite(
            sprite_id,
            pos,
            DrawOptions {
                size: None,
                animation_idx,
                render_options: player.render_options,
            },
        );
    }

    // -- Accessors --

    /// Fraction of a step left in the accumulator, in `[0, 1]`.
    #[inline]
    pub fn interpolation(&self) -> f32 {
        self.interpolation
    }

    /// Accumulated, not yet simulated time in seconds.
    #[inline]
    pub fn update_timer(&self) -> f64 {
        self.update_timer
    }

    /// Fixed steps run since the scene was created.
    #[inline]
    pub fn steps_run(&self) -> u64 {
        self.steps_run
    }

    /// Sounds requested since the last drain.
    #[inline]
    pub fn pending_sounds(&self) -> &[SoundId] {
        self.sounds.pending()
    }

    /// Hand pending sound requests to the host.
    pub fn drain_sounds(&mut self) -> Vec<SoundId> {
        self.sounds.drain().collect()
    }
}
