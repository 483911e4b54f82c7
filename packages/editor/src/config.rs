use crate::history::DEFAULT_CAPACITY;
use pagecraft_model::Breakpoint;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "pagecraft.config.json";

/// Builder configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderConfig {
    /// Undo/redo entries retained per page
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Upper bound on any single persistence call
    #[serde(default = "default_persistence_timeout_ms")]
    pub persistence_timeout_ms: u64,

    /// Let `BuilderSession::autosave` save; the host calls it after commits
    #[serde(default)]
    pub autosave: bool,

    /// Breakpoint a new session opens on
    #[serde(default)]
    pub default_breakpoint: Breakpoint,
}

fn default_history_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_persistence_timeout_ms() -> u64 {
    5_000
}

impl BuilderConfig {
    /// Load config from a directory, falling back to defaults when absent
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config_path = dir.as_ref().join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: BuilderConfig = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(BuilderConfig::default())
        }
    }

    pub fn persistence_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.persistence_timeout_ms)
    }
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
            persistence_timeout_ms: default_persistence_timeout_ms(),
            autosave: false,
            default_breakpoint: Breakpoint::Desktop,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
