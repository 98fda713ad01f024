//! Level Module
//!
//! A level is a vertical stack of rooms plus the solids living in it.
//!
//! - [`default_level`] - the procedurally built first-run level
//! - [`level_file`] - fixed-size binary persistence (`level.bin`)

pub mod default_level;
pub mod level_file;

use std::path::Path;

use glam::IVec2;

use crate::world::RoomStack;

use super::solids::Solid;

pub use default_level::default_level;
pub use level_file::{LevelFileError, load_level, save_level};

/// Maximum solids in one level.
pub const MAX_SOLIDS: usize = 16;

/// Maximum rooms in one level.
pub const MAX_ROOMS: usize = 4;

/// Current level data version.
pub const LEVEL_VERSION: u32 = 1;

/// Tiles, solids and the spawn point.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub version: u32,
    /// Player top-left on (re)spawn
    pub spawn: IVec2,
    pub rooms: RoomStack,
    /// Insertion order is collision scan order
    pub solids: Vec<Solid>,
}

impl Level {
    /// Empty level with `room_count` rooms.
    ///
    /// # Panics
    ///
    /// When `room_count` is 0 or above [`MAX_ROOMS`].
    pub fn new(room_count: usize, spawn: IVec2) -> Self {
        assert!(
            (1..=MAX_ROOMS).contains(&room_count),
            "Level needs 1..={MAX_ROOMS} rooms, got {room_count}"
        );
        Self {
            version: LEVEL_VERSION,
            spawn,
            rooms: RoomStack::new(room_count),
            solids: Vec::with_capacity(MAX_SOLIDS),
        }
    }

    /// Append a solid; returns its index.
    ///
    /// # Panics
    ///
    /// When the level already holds [`MAX_SOLIDS`] solids.
    pub fn add_solid(&mut self, solid: Solid) -> usize {
        assert!(
            self.solids.len() < MAX_SOLIDS,
            "Level solids full ({MAX_SOLIDS})"
        );
        self.solids.push(solid);
        self.solids.len() - 1
    }

    /// Load `path`, or build the default level when it is missing or unusable.
    pub fn load_or_default(path: &Path) -> Self {
        match load_level(path) {
            Ok(level) => {
                tracing::info!(
                    "Loaded level from {} ({} rooms, {} solids)",
                    path.display(),
                    level.rooms.len(),
                    level.solids.len()
                );
                level
            }
            Err(LevelFileError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No level at {}, building default level", path.display());
                default_level()
            }
            Err(e) => {
                tracing::warn!("Discarding level file {}: {e}", path.display());
                default_level()
            }
        }
    }
}
