//! Platformer Sim - headless driver
//!
//! Runs the platformer scene without a window: a scripted key sequence is fed
//! through the fixed-step driver at a simulated 144 Hz display rate, a draw
//! list is rebuilt every frame, and a summary is logged at the end.
//!
//! Run with: `cargo run --bin platformer_sim -- [config.json]`
//!
//! Logging follows `RUST_LOG` (default `info`).

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use schnitzel_engine::game::{GameConfig, PlatformerScene};
use schnitzel_engine::input::{Input, KeyCode};
use schnitzel_engine::render::DrawList;

// ============================================================================
// CONSTANTS
// ============================================================================

const DEFAULT_CONFIG_PATH: &str = "platformer.json";

/// Simulated display refresh rate.
const DISPLAY_HZ: f32 = 144.0;

/// Total simulated time in seconds.
const RUN_SECONDS: f32 = 6.0;

/// Scripted key holds: `(start, end, key)` in seconds.
const SCRIPT: &[(f32, f32, KeyCode)] = &[
    (0.2, 1.4, KeyCode::D),
    (0.6, 0.8, KeyCode::Space),
    (1.6, 1.7, KeyCode::Space),
    (1.65, 1.7, KeyCode::X),
    (2.2, 3.2, KeyCode::A),
    (2.5, 2.9, KeyCode::Space),
    (3.4, 4.6, KeyCode::D),
    (3.8, 4.2, KeyCode::Z),
    (4.0, 4.1, KeyCode::W),
    (4.8, 5.6, KeyCode::A),
];

// ============================================================================
// MAIN
// ============================================================================

fn main() {
    init_tracing();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let mut config = GameConfig::load_or_default(&config_path);
    // Nothing paints without a mouse, and the scripted keys never hit F5/F9
    config.editor_enabled = false;

    let mut scene = PlatformerScene::new(config);
    let mut input = Input::new();
    let mut draw_list = DrawList::new();

    let frame_time = 1.0 / DISPLAY_HZ;
    let frames = (RUN_SECONDS * DISPLAY_HZ) as u32;
    let mut total_steps = 0u32;
    let mut total_draw_calls = 0usize;
    let mut sounds_played = 0usize;

    for frame in 0..frames {
        let now = frame as f32 * frame_time;
        for &(start, end, key) in SCRIPT {
            let want = now >= start && now < end;
            if want != input.keyboard.is_down(key) {
                input.keyboard.handle_key(key, want);
            }
        }

        total_steps += scene.update_frame(frame_time, &mut input);
        scene.draw(&mut draw_list);
        total_draw_calls += draw_list.len();

        for sound in scene.drain_sounds() {
            tracing::debug!("t={now:.3}s sound {}", sound.file_name());
            sounds_played += 1;
        }
    }

    let player = &scene.player;
    tracing::info!(
        "Simulated {frames} frames / {total_steps} steps: player at {:?} ({:?}), {} deaths, room {}",
        player.pos,
        player.animation_state,
        player.deaths,
        scene.camera.room_index
    );
    tracing::info!(
        "{total_draw_calls} draw calls ({} bytes last frame), {sounds_played} sounds",
        draw_list.as_bytes().len()
    );
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
