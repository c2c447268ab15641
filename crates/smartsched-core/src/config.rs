//! SmartSched configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, SchedError};

/// Root configuration, read from `~/.smartsched/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SmartSchedConfig {
    /// Where the task list is stored. `~` is expanded by the binary.
    #[serde(default = "default_data_file")]
    pub data_file: String,
    /// Default tracing filter when neither `RUST_LOG` nor `--verbose` is given.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_data_file() -> String {
    "data/tasks.json".into()
}
fn default_log_level() -> String {
    "warn".into()
}

impl Default for SmartSchedConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            log_level: default_log_level(),
        }
    }
}

impl SmartSchedConfig {
    /// Load config from the default path, falling back to defaults when absent.
    pub fn load() -> Result<Self> {
        Self::load_or_default(&Self::default_path())
    }

    /// Load config from `path` if it exists, otherwise return defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SchedError::Config(format!("Failed to read {}: {e}", path.display())))?;
        toml::from_str(&content)
            .map_err(|e| SchedError::Config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Write config to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| SchedError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Write the defaults to `path` unless a file is already there.
    /// Returns true if a file was written.
    pub fn init_default(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        Self::default().save_to(path)?;
        Ok(true)
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        Self::home_dir().join("config.toml")
    }

    /// Get the SmartSched home directory.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".smartsched")
    }
}
