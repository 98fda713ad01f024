//! In-game Level Editor
//!
//! Paints foreground tiles under the mouse and saves/loads the level file.
//!
//! | Input             | Effect                         |
//! |-------------------|--------------------------------|
//! | Left mouse        | paint `Solid`                  |
//! | Shift + left      | paint `Spike`                  |
//! | Right mouse       | erase                          |
//! | F5                | save level                     |
//! | F9                | reload level from disk         |
//!
//! Runs inside the fixed step, before game inputs are refreshed.

use std::path::{Path, PathBuf};

use glam::IVec2;

use crate::input::{Input, KeyCode};
use crate::world::{TileLayer, TileType, world_to_cell};

use super::level::{Level, save_level};

/// What the editor did this step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    None,
    /// A tile changed in this room
    Painted { room: usize },
    Saved,
    /// The level was replaced; anything holding level state must reset
    Reloaded,
}

/// Mouse/keyboard level editing.
#[derive(Debug, Clone)]
pub struct LevelEditor {
    pub enabled: bool,
    level_path: PathBuf,
}

impl LevelEditor {
    pub fn new(enabled: bool, level_path: impl Into<PathBuf>) -> Self {
        Self {
            enabled,
            level_path: level_path.into(),
        }
    }

    pub fn level_path(&self) -> &Path {
        &self.level_path
    }

    /// Apply this step's editor input to `level`.
    ///
    /// `input.mouse.world_pos` must already be projected through the camera.
    pub fn apply(&mut self, input: &Input, level: &mut Level) -> EditorAction {
        if !self.enabled {
            return EditorAction::None;
        }

        if input.keyboard.just_pressed(KeyCode::F5) {
            return match save_level(&self.level_path, level) {
                Ok(()) => EditorAction::Saved,
                Err(e) => {
                    tracing::warn!("Level save to {} failed: {e}", self.level_path.display());
                    EditorAction::None
                }
            };
        }
        if input.keyboard.just_pressed(KeyCode::F9) {
            *level = Level::load_or_default(&self.level_path);
            return EditorAction::Reloaded;
        }

        let kind = if input.mouse.left.is_down {
            if input.keyboard.shift_down() {
                TileType::Spike
            } else {
                TileType::Solid
            }
        } else if input.mouse.right.is_down {
            TileType::None
        } else {
            return EditorAction::None;
        };

        let cell: IVec2 = world_to_cell(input.mouse.world_pos.floor().as_ivec2());
        match level.rooms.set_tile(TileLayer::Foreground, cell, kind) {
            Some(room) => EditorAction::Painted { room },
            None => EditorAction::None,
        }
    }
}
