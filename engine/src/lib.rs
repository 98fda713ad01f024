//! Schnitzel Engine Library
//!
//! A 2D pixel platformer core: integer-pixel movement and collision, tile
//! autotiling, moving platforms and a Celeste-style player controller, driven
//! by a fixed timestep. Windowing, GPU work and audio playback belong to the
//! host; the simulation talks to it through an input snapshot, a draw list and
//! a sound queue.
//!
//! # Modules
//!
//! - [`physics`] - Integer rectangles, `approach`, sub-pixel accumulator stepping
//! - [`world`] - Tile grids, autotiling, vertically stacked rooms
//! - [`input`] - Platform-agnostic keyboard/mouse state, bindings, game inputs
//! - [`render`] - Draw list, sprite atlas table, room camera
//! - [`audio`] - Sound request queue
//! - [`game`] - Level, solids, player, editor and the fixed-step scene
//!
//! # Example
//!
//! ```ignore
//! use schnitzel_engine::game::{GameConfig, PlatformerScene};
//! use schnitzel_engine::input::{Input, KeyCode};
//! use schnitzel_engine::render::DrawList;
//!
//! let mut scene = PlatformerScene::new(GameConfig::default());
//! let mut input = Input::new();
//! let mut draw_list = DrawList::new();
//!
//! // Once per displayed frame
//! input.keyboard.handle_key(KeyCode::D, true);
//! scene.update_frame(1.0 / 144.0, &mut input);
//! scene.draw(&mut draw_list);
//! for sound in scene.drain_sounds() {
//!     // play sound.file_name()
//! }
//! ```

pub mod audio;
pub mod input;
pub mod physics;
pub mod render;
pub mod world;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export commonly used input types
pub use input::{GameInputType, Input, KeyCode, KeyboardState, MouseButton, MouseState};
// Re-export geometry helpers
pub use physics::{IRect, approach, rect_collision};
