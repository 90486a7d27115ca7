use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::ordering::DEFAULT_JITTER;

/// Search settings, loadable from TOML:
///
/// ```toml
/// depth = 4
/// jitter = 10
/// seed = 1234
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Plies searched per move
    pub depth: u8,
    /// Inclusive upper bound of the move-ordering jitter; 0 turns it off
    pub jitter: u32,
    /// Fixed ordering seed; fresh entropy when absent
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            jitter: DEFAULT_JITTER,
            seed: None,
        }
    }
}

impl SearchConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
