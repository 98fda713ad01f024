//! Config Module
//!
//! Centralized configuration for the simulation, the player controller and
//! the editor.

pub mod game_config;
pub mod player_tuning;

pub use game_config::{ConfigError, DEFAULT_LEVEL_PATH, GameConfig, SimulationConfig};
pub use player_tuning::{DashCarryRule, PlayerTuning};
