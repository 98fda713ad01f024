//! Scene Tests - Fixed Timestep, Death Cycle and Moving Platforms
//!
//! Drives `PlatformerScene` end to end with scripted raw input.

use glam::{IVec2, Vec2};
use schnitzel_engine::audio::SoundId;
use schnitzel_engine::game::config::GameConfig;
use schnitzel_engine::game::level::{Level, default_level};
use schnitzel_engine::game::scenes::{PlatformerScene, UPDATE_DELAY};
use schnitzel_engine::game::solids::{Keyframe, Solid};
use schnitzel_engine::input::{Input, KeyCode};
use schnitzel_engine::physics::rect_collision;
use schnitzel_engine::render::{DrawList, SpriteId};
use schnitzel_engine::world::{TileLayer, TileType};

fn test_config() -> GameConfig {
    GameConfig {
        editor_enabled: false,
        ..Default::default()
    }
}

/// Key state for fixed step `step` of a short scripted run.
fn scripted_keys(step: u32) -> [(KeyCode, bool); 4] {
    [
        (KeyCode::D, (10..70).contains(&step)),
        (KeyCode::Space, (30..40).contains(&step) || (95..100).contains(&step)),
        (KeyCode::X, (50..52).contains(&step)),
        (KeyCode::A, (80..120).contains(&step)),
    ]
}

fn apply_keys(input: &mut Input, step: u32) {
    for (key, down) in scripted_keys(step) {
        if input.keyboard.is_down(key) != down {
            input.keyboard.handle_key(key, down);
        }
    }
}

// ============================================================================
// Fixed Timestep Tests
// ============================================================================

#[test]
fn test_frame_chunking_does_not_change_simulation() {
    let mut coarse = PlatformerScene::with_level(test_config(), default_level());
    let mut fine = PlatformerScene::with_level(test_config(), default_level());
    let mut coarse_input = Input::new();
    let mut fine_input = Input::new();

    for step in 0..150 {
        apply_keys(&mut coarse_input, step);
        assert_eq!(coarse.update_frame(1.0 / 60.0, &mut coarse_input), 1);

        apply_keys(&mut fine_input, step);
        let mut steps = 0;
        for _ in 0..3 {
            steps += fine.update_frame(1.0 / 180.0, &mut fine_input);
        }
        assert_eq!(steps, 1, "fine chunking ran {steps} steps at step {step}");

        assert_eq!(coarse.player, fine.player, "diverged at step {step}");
    }
    assert_eq!(coarse.level.solids, fine.level.solids);
    assert_eq!(coarse.steps_run(), fine.steps_run());
}

#[test]
fn test_long_frame_is_capped() {
    let mut scene = PlatformerScene::with_level(test_config(), default_level());
    let mut input = Input::new();

    let steps = scene.update_frame(1.0, &mut input);
    assert_eq!(steps, scene.config.simulation.max_steps_per_frame);
    assert!(scene.update_timer() < UPDATE_DELAY);
}

#[test]
fn test_interpolation_is_leftover_fraction() {
    let mut scene = PlatformerScene::with_level(test_config(), default_level());
    let mut input = Input::new();

    let steps = scene.update_frame((UPDATE_DELAY * 1.5) as f32, &mut input);
    assert_eq!(steps, 1);
    assert!((scene.interpolation() - 0.5).abs() < 1e-3);
}

#[test]
fn test_high_refresh_rate_averages_to_sixty_steps() {
    let mut scene = PlatformerScene::with_level(test_config(), default_level());
    let mut input = Input::new();

    let mut steps = 0;
    for _ in 0..144 {
        steps += scene.update_frame(1.0 / 144.0, &mut input);
    }
    assert!((59..=60).contains(&steps), "ran {steps} steps in one second");
}

// ============================================================================
// Death Cycle Tests
// ============================================================================

fn spike_pit_level() -> Level {
    let mut level = Level::new(1, IVec2::new(16, 144));
    for x in 0..40 {
        let kind = if (10..14).contains(&x) {
            TileType::Spike
        } else {
            TileType::Solid
        };
        level.rooms.set_tile(TileLayer::Foreground, IVec2::new(x, 20), kind);
    }
    level
}

#[test]
fn test_death_and_respawn_round_trip() {
    let mut scene = PlatformerScene::with_level(test_config(), spike_pit_level());
    let mut input = Input::new();

    // Drop onto the spikes
    scene.player.pos = IVec2::new(88, 130);
    scene.player.prev_pos = scene.player.pos;

    let mut steps_to_die = 0;
    while scene.player.is_alive() {
        scene.step(&mut input);
        steps_to_die += 1;
        assert!(steps_to_die < 60, "player never hit the spikes");
    }
    assert_eq!(scene.player.deaths, 1);
    assert_eq!(scene.pending_sounds(), &[SoundId::Death]);
    assert_eq!(scene.drain_sounds(), vec![SoundId::Death]);
    assert!(scene.pending_sounds().is_empty());

    for _ in 0..29 {
        scene.step(&mut input);
        assert!(!scene.player.is_alive());
    }
    scene.step(&mut input);

    assert!(scene.player.is_alive());
    assert_eq!(scene.player.pos, scene.level.spawn);
    assert_eq!(scene.player.speed, Vec2::ZERO);
    assert_eq!(scene.player.remainder, Vec2::ZERO);
    assert_eq!(scene.player.deaths, 1);
    assert!(scene.drain_sounds().is_empty());
}

#[test]
fn test_draw_after_respawn_has_no_smear() {
    let mut scene = PlatformerScene::with_level(test_config(), spike_pit_level());
    let mut input = Input::new();
    scene.player.kill(Vec2::ZERO);
    for _ in 0..30 {
        scene.step(&mut input);
    }
    assert_eq!(scene.player.prev_pos, scene.player.pos);

    let mut list = DrawList::new();
    scene.draw(&mut list);
    assert!(!list.is_empty());
}

// ============================================================================
// Moving Platform Tests
// ============================================================================

#[test]
fn test_platform_carries_rider() {
    let start = IVec2::new(100, 100);
    let mut level = Level::new(1, IVec2::new(104, 84));
    level.add_solid(Solid::with_path(
        SpriteId::Platform,
        IVec2::new(24, 8),
        &[
            Keyframe::new(start, 0.0),
            Keyframe::new(start + IVec2::new(8, 0), 10.0 / 60.0),
            Keyframe::new(start + IVec2::new(8, 0), 100.0),
        ],
    ));

    let mut scene = PlatformerScene::with_level(test_config(), level);
    let mut input = Input::new();
    let mut carried = 0.0;
    for _ in 0..10 {
        scene.step(&mut input);
        carried += scene.player.solid_speed.x;
    }

    assert_eq!(scene.level.solids[0].pos, start + IVec2::new(8, 0));
    assert_eq!(carried, 8.0);
    assert_eq!(scene.player.pos, IVec2::new(112, 84));
    assert!(scene.player.grounded);
}

#[test]
fn test_platform_pushes_player_sideways() {
    let start = IVec2::new(100, 100);
    let mut level = Level::new(1, IVec2::new(126, 104));
    // Floor under the player's feet at y = 120, below the platform
    for x in 0..40 {
        level
            .rooms
            .set_tile(TileLayer::Foreground, IVec2::new(x, 15), TileType::Solid);
    }
    level.add_solid(Solid::with_path(
        SpriteId::Platform,
        IVec2::new(24, 8),
        &[
            Keyframe::new(start, 0.0),
            Keyframe::new(start + IVec2::new(8, 0), 10.0 / 60.0),
            Keyframe::new(start + IVec2::new(8, 0), 100.0),
        ],
    ));

    let mut scene = PlatformerScene::with_level(test_config(), level);
    let mut input = Input::new();
    for _ in 0..10 {
        scene.step(&mut input);
    }
    // Platform's right edge ends at 132 and the player stays flush with it
    assert_eq!(scene.player.pos, IVec2::new(132, 104));
    assert!(!rect_collision(scene.player.rect(), scene.level.solids[0].rect()));
}

#[test]
fn test_squeeze_against_wall_resets_to_spawn() {
    let start = IVec2::new(100, 100);
    let spawn = IVec2::new(16, 16);
    let mut level = Level::new(1, spawn);
    // Wall column right of the player at x = 136..144
    for y in 0..23 {
        level
            .rooms
            .set_tile(TileLayer::Foreground, IVec2::new(17, y), TileType::Solid);
    }
    level.add_solid(Solid::with_path(
        SpriteId::Platform,
        IVec2::new(24, 8),
        &[
            Keyframe::new(start, 0.0),
            Keyframe::new(start + IVec2::new(16, 0), 10.0 / 60.0),
            Keyframe::new(start + IVec2::new(16, 0), 100.0),
        ],
    ));

    let mut scene = PlatformerScene::with_level(test_config(), level);
    scene.player.pos = IVec2::new(126, 96);
    scene.player.prev_pos = scene.player.pos;
    let mut input = Input::new();
    for _ in 0..10 {
        scene.step(&mut input);
    }
    assert_eq!(scene.player.deaths, 0);
    assert!(scene.player.pos.x < 100, "player was not sent back to spawn");
}
