//! Game Module
//!
//! The concrete platformer built on top of the engine: level data, solids,
//! the player controller, the editor and the scene that drives them.

pub mod collision;
pub mod config;
pub mod editor;
pub mod level;
pub mod player;
pub mod scenes;
pub mod solids;

pub use collision::{CollisionFilter, CollisionHit, WallSide, first_collision, wall_contact};
pub use config::{DashCarryRule, GameConfig, PlayerTuning};
pub use editor::{EditorAction, LevelEditor};
pub use level::{Level, LevelFileError, default_level, load_level, save_level};
pub use player::{AnimationState, DEATH_ANIM_TIME, PLAYER_SIZE, Player};
pub use scenes::{PlatformerScene, UPDATE_DELAY};
pub use solids::{Keyframe, Solid, update_solids};
