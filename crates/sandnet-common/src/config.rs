//! Global configuration model for sandnet.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{Result, SandnetError};

/// Root configuration for sandbox identity setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandnetConfig {
    /// Base directory holding one subdirectory per sandbox.
    pub sandbox_root: PathBuf,
    /// Hosts file copied into each sandbox.
    pub hosts_file: PathBuf,
}

impl Default for SandnetConfig {
    fn default() -> Self {
        Self {
            sandbox_root: PathBuf::from(constants::DEFAULT_SANDBOX_ROOT),
            hosts_file: PathBuf::from(constants::SYSTEM_HOSTS_FILE),
        }
    }
}

impl SandnetConfig {
    /// Loads a configuration from a JSON file.
    ///
    /// Missing keys fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a
    /// configured path is relative.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SandnetError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every configured path is absolute.
    ///
    /// # Errors
    ///
    /// Returns [`SandnetError::Config`] naming the first relative path.
    pub fn validate(&self) -> Result<()> {
        for (key, path) in [
            ("sandbox_root", &self.sandbox_root),
            ("hosts_file", &self.hosts_file),
        ] {
            if !path.is_absolute() {
                return Err(SandnetError::Config {
                    message: format!("{key} must be absolute: {}", path.display()),
                });
            }
        }
        Ok(())
    }
}
