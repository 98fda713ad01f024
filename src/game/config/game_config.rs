//! Game Configuration
//!
//! Top-level settings loaded from a JSON file. Every field has a default, so a
//! partial file only overrides what it names.
//!
//! ```json
//! {
//!     "physics": { "dash_speed": 5.0, "dash_carry_rule": "compare_current_sign" },
//!     "simulation": { "max_steps_per_frame": 4 },
//!     "level_path": "saves/level.bin"
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::PlayerTuning;

/// Default location of the level save file.
pub const DEFAULT_LEVEL_PATH: &str = "level.bin";

/// Errors that can occur while loading a config file.
#[derive(Debug)]
pub enum ConfigError {
    /// Standard I/O error.
    Io(std::io::Error),
    /// JSON deserialization error.
    Json(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {e}"),
            ConfigError::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

/// Fixed-step driver settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Catch-up cap; time beyond this many steps in one frame is dropped
    pub max_steps_per_frame: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_steps_per_frame: 8,
        }
    }
}

/// Everything configurable about a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub physics: PlayerTuning,
    pub simulation: SimulationConfig,
    /// Where the level editor saves and loads
    pub level_path: PathBuf,
    /// Mouse painting and save/load keys
    pub editor_enabled: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            physics: PlayerTuning::default(),
            simulation: SimulationConfig::default(),
            level_path: PathBuf::from(DEFAULT_LEVEL_PATH),
            editor_enabled: true,
        }
    }
}

impl GameConfig {
    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Like [`load`](Self::load), but falls back to defaults. A missing file
    /// is silent; anything else is logged.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                GameConfig::default()
            }
            Err(e) => {
                tracing::warn!("Failed to parse {}: {e}, using defaults", path.display());
                GameConfig::default()
            }
        }
    }

    /// Write the config as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}
