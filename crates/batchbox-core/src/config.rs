//! Harness configuration.
//!
//! Sources, later ones win:
//! 1. built-in defaults
//! 2. a TOML file (`load_toml`, usually as one table of a larger file)
//! 3. environment variables (`HarnessConfig::apply_env`)
//!
//! CLI flags are layered on top by the binary.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::app::environment::ExecutionEnvironment;
use crate::app::workspace::DEFAULT_OUTPUT_DIR;
use crate::error::ConfigError;

/// Overrides `output_dir`.
pub const OUTPUT_DIR_ENV: &str = "BATCHBOX_OUTPUT_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Directory guaranteed to exist before the task runs.
    pub output_dir: PathBuf,

    pub environment: ExecutionEnvironment,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            environment: ExecutionEnvironment::default(),
        }
    }
}

/// Read and deserialize a TOML config file.
pub fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_toml(&contents)
}

pub fn parse_toml<T: DeserializeOwned>(value: &str) -> Result<T, ConfigError> {
    Ok(toml::from_str(value)?)
}

impl HarnessConfig {
    /// Apply overrides from an environment lookup (usually `std::env::var(..).ok()`).
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(OUTPUT_DIR_ENV) {
            if dir.is_empty() {
                return Err(ConfigError::InvalidValue {
                    name: OUTPUT_DIR_ENV.to_string(),
                    value: dir,
                    reason: "must not be empty".to_string(),
                });
            }
            self.output_dir = PathBuf::from(dir);
        }
        Ok(())
    }
}
