//! Render Module
//!
//! The render collaborator surface. The simulation never talks to a GPU; it
//! fills a [`DrawList`] of Pod [`Transform`] records each frame and a host
//! renderer uploads them as instances.
//!
//! - [`sprites`] - atlas layout and autotile palette coordinates
//! - [`draw_list`] - per-frame draw calls
//! - [`camera`] - room-framing orthographic camera

pub mod camera;
pub mod draw_list;
pub mod sprites;

pub use camera::Camera2D;
pub use draw_list::{DrawList, DrawOptions, RENDER_OPTION_FLIP_X, RENDER_OPTION_FLIP_Y, Transform};
pub use sprites::{Sprite, SpriteId, autotile_atlas_offset, get_sprite};
