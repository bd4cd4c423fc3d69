//! Install and download locations for tool versions
//!
//! Versions are opaque strings here. A `path` version is a user-supplied
//! directory used verbatim as the install path; it has no download path.

pub mod version;

use std::fs;
use std::path::PathBuf;

use asdf_fs::{Config, Error, Result, download_directory, install_directory};
use asdf_plugins::Plugin;

pub use version::{VersionType, decode_version, encode_version};

/// Directory a version is (or would be) installed into.
///
/// For [`VersionType::Path`] this is `version` itself, unvalidated.
pub fn install_path(
    config: &Config,
    plugin: &Plugin,
    version_type: &VersionType,
    version: &str,
) -> PathBuf {
    if *version_type == VersionType::Path {
        return PathBuf::from(version);
    }

    install_directory(&config.data_dir, &plugin.name).join(encode_version(version_type, version))
}

/// Directory a version's sources are downloaded into.
///
/// `None` for [`VersionType::Path`]: there is nothing to download.
pub fn download_path(
    config: &Config,
    plugin: &Plugin,
    version_type: &VersionType,
    version: &str,
) -> Option<PathBuf> {
    if *version_type == VersionType::Path {
        return None;
    }

    Some(
        download_directory(&config.data_dir, &plugin.name)
            .join(encode_version(version_type, version)),
    )
}

/// Whether the install path exists.
///
/// Only "not found" counts as not installed; any other stat failure
/// (permission denied, for one) is reported as installed.
pub fn is_installed(
    config: &Config,
    plugin: &Plugin,
    version_type: &VersionType,
    version: &str,
) -> bool {
    let path = install_path(config, plugin, version_type, version);
    !matches!(fs::metadata(&path), Err(e) if e.kind() == std::io::ErrorKind::NotFound)
}

/// Encoded names of every installed version of `plugin`, sorted.
///
/// A missing install directory means nothing is installed. Any other read
/// error is returned.
pub fn installed(config: &Config, plugin: &Plugin) -> Result<Vec<String>> {
    let dir = install_directory(&config.data_dir, &plugin.name);
    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(plugin = %plugin.name, "No install directory");
            return Ok(Vec::new());
        }
        Err(e) => return Err(Error::io(dir, e)),
    };

    let mut versions = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(&dir, e))?;
        let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;
        if file_type.is_dir() {
            versions.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    versions.sort();
    Ok(versions)
}
