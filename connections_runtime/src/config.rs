//! Runtime configuration, loaded from JSON. Every field has a default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use connections_kernel::domain::GameConfig;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    /// Header prefix, followed by ` #<puzzle id>`.
    pub title: String,
    /// Optional trailing line.
    pub link: Option<String>,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            title: "Footly Puzzle".to_string(),
            link: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub game: GameConfig,
    /// File store location. None keeps state in memory only.
    pub data_path: Option<PathBuf>,
    pub share: ShareConfig,
}

impl RuntimeConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.game.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}
