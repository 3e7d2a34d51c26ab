//! Runner configuration via TOML
//!
//! The runner works with defaults. To change them, point `MERETDD_CONFIG` at a
//! TOML file:
//!
//! ```toml
//! # Hide the default panic message of panicking case bodies (default: true).
//! # The message is still logged at debug level.
//! quiet_panics = true
//! ```

use meretdd_core::{HarnessError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming the config file read by [`RunnerConfig::load`].
pub const CONFIG_ENV: &str = "MERETDD_CONFIG";

/// Settings for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Suppress the panic hook while a case body runs.
    #[serde(default = "default_quiet_panics")]
    pub quiet_panics: bool,
}

fn default_quiet_panics() -> bool {
    true
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            quiet_panics: default_quiet_panics(),
        }
    }
}

impl RunnerConfig {
    /// Parse config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| HarnessError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            HarnessError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            HarnessError::Config(msg) => {
                HarnessError::Config(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })
    }

    /// Config from the file named by `MERETDD_CONFIG`, or defaults when unset.
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }
}

/// Serializes tests that read or write `MERETDD_CONFIG`.
#[cfg(test)]
pub(crate) static CONFIG_ENV_LOCK: parking_lot::Mutex<()> = parking_lot::const_mutex(());
