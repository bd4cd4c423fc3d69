//! The `Plugin` value and existence checks

use std::fs;
use std::path::{Path, PathBuf};

use asdf_fs::{Config, plugin_directory};
use serde::Serialize;

use crate::{Error, Result};

/// Directory inside a plugin that holds its callback scripts.
pub const CALLBACK_DIR: &str = "bin";

/// An installed plugin.
///
/// `url` and `git_ref` are only populated on demand by
/// [`registry::list`](crate::registry::list).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plugin {
    pub name: String,
    pub dir: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,
}

impl Plugin {
    /// Build the plugin value for `name` under the configured data directory.
    ///
    /// Does not touch the filesystem.
    pub fn new(config: &Config, name: &str) -> Self {
        Self {
            name: name.to_string(),
            dir: plugin_directory(&config.data_dir, name),
            url: None,
            git_ref: None,
        }
    }

    /// Path a callback script named `callback` would live at.
    pub fn callback_path(&self, callback: &str) -> PathBuf {
        self.dir.join(CALLBACK_DIR).join(callback)
    }
}

/// Whether `<data_dir>/plugins/<name>` exists and is a directory.
///
/// A regular file at that path is not a plugin.
pub fn plugin_exists(data_dir: &Path, name: &str) -> Result<bool> {
    let dir = plugin_directory(data_dir, name);
    match fs::metadata(&dir) {
        Ok(meta) => Ok(meta.is_dir()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::Fs(asdf_fs::Error::io(dir, e))),
    }
}
