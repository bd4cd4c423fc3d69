//! Runtime configuration
//!
//! Only the data directory matters to the plugin, install and shim layers.
//! It is resolved once by the caller and passed by reference everywhere.

use std::path::PathBuf;

use crate::{Error, Result};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "ASDF_DATA_DIR";

/// Directory name used under `$HOME` when no override is set.
pub const DEFAULT_DATA_DIR_NAME: &str = ".asdf";

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root of plugins, installs, downloads and shims.
    pub data_dir: PathBuf,
}

impl Config {
    /// Create a config rooted at an explicit data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an environment lookup function.
    ///
    /// `ASDF_DATA_DIR` wins when set and non-empty; otherwise the data
    /// directory is `$HOME/.asdf`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
            tracing::debug!(data_dir = %dir, "Using data directory from {}", DATA_DIR_ENV);
            return Ok(Self::new(dir));
        }

        let home = dirs::home_dir().ok_or(Error::HomeNotFound)?;
        Ok(Self::new(home.join(DEFAULT_DATA_DIR_NAME)))
    }
}
