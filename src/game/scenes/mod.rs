//! Scene Module
//!
//! High-level scene compositions that wire together all game systems.

pub mod platformer_scene;

pub use platformer_scene::{PlatformerScene, UPDATE_DELAY};
