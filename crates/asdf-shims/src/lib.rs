//! Shim synthesis
//!
//! Every executable exposed by an installed tool version gets a small
//! dispatch script under `<data_dir>/shims/<name>`. Several plugins and
//! versions may expose the same name; each one is recorded as a metadata
//! line in the same shim (see [`Shim`]).
//!
//! Writes hold an exclusive lock on the shim file for the whole
//! read-modify-write, so concurrent installs never lose a registration.

pub mod error;
pub mod shim;

use std::fs;
use std::path::{Path, PathBuf};

use asdf_fs::{Config, install_directory, io::update_locked, shims_directory};
use asdf_installs::{VersionType, decode_version, install_path};
use asdf_plugins::{Callback, Plugin};

pub use error::{Error, Result};
pub use shim::{Shim, ShimRegistration};

/// Permissions for shim files.
pub const SHIM_MODE: u32 = 0o755;

/// Executable directory used when a plugin has no `list-bin-paths` callback.
pub const DEFAULT_BIN_DIR: &str = "bin";

/// Location of the shim named `shim_name`.
pub fn path(config: &Config, shim_name: &str) -> PathBuf {
    shims_directory(&config.data_dir).join(shim_name)
}

/// Directories, relative to an install, that hold the plugin's executables.
///
/// The whitespace-separated output of `list-bin-paths` replaces the default
/// `["bin"]` when the plugin provides that callback.
pub fn executable_dirs(plugin: &Plugin) -> Result<Vec<String>> {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let env = Default::default();

    match plugin.run_callback(
        Callback::ListBinPaths.as_str(),
        &[],
        &env,
        &mut stdout,
        &mut stderr,
    ) {
        Ok(()) => {}
        Err(e) if e.is_no_callback() => return Ok(vec![DEFAULT_BIN_DIR.to_string()]),
        Err(e) => return Err(e.into()),
    }

    Ok(String::from_utf8_lossy(&stdout)
        .split_whitespace()
        .map(str::to_string)
        .collect())
}

/// Absolute paths of the executables an installed version provides.
///
/// Only regular files directly inside each executable directory are
/// returned, in directory order. Directories that do not exist are skipped.
pub fn tool_executables(config: &Config, plugin: &Plugin, version: &str) -> Result<Vec<PathBuf>> {
    let install = install_path(config, plugin, &VersionType::Version, version);
    executables_in(plugin, &install)
}

fn executables_in(plugin: &Plugin, install: &Path) -> Result<Vec<PathBuf>> {
    let mut executables = Vec::new();

    for dir in executable_dirs(plugin)? {
        let dir = install.join(dir);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    plugin = %plugin.name,
                    dir = %dir.display(),
                    "Executable directory does not exist"
                );
                continue;
            }
            Err(e) => return Err(asdf_fs::Error::io(dir, e).into()),
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| asdf_fs::Error::io(&dir, e))?;
            let path = entry.path();
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        executables.extend(files);
    }

    Ok(executables)
}

/// Register `plugin` at `version` in the shim for `executable`.
///
/// Creates the shim if needed. Returns `true` if the file changed; writing
/// the same registration twice leaves the file (and its mtime) alone.
pub fn write(config: &Config, plugin: &Plugin, version: &str, executable: &Path) -> Result<bool> {
    if !ShimRegistration::is_valid(&plugin.name, version) {
        return Err(Error::InvalidRegistration {
            plugin: plugin.name.clone(),
            version: version.to_string(),
        });
    }

    let name = executable
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| Error::InvalidExecutable {
            path: executable.to_path_buf(),
        })?;
    let shim_path = path(config, name);

    let written = update_locked(&shim_path, SHIM_MODE, |current| {
        let mut shim = if current.is_empty() {
            Shim::new(name)
        } else {
            Shim::parse(current).map_err(|message| Error::MalformedShim {
                path: shim_path.clone(),
                message,
            })?
        };

        let added = shim.register(&plugin.name, version);
        Ok::<_, Error>(added.then(|| shim.render()))
    })?;

    if written {
        tracing::debug!(
            plugin = %plugin.name,
            version = %version,
            shim = %shim_path.display(),
            "Wrote shim"
        );
    }

    Ok(written)
}

/// Version string recorded in shim metadata for `(version_type, version)`.
///
/// Refs are written as `ref:<version>`; every other kind as the bare version.
pub fn registration_version(version_type: &VersionType, version: &str) -> String {
    match version_type {
        VersionType::Ref => format!("ref:{version}"),
        _ => version.to_string(),
    }
}

/// Write shims for every executable of an installed version.
///
/// Returns the shim paths that changed.
pub fn generate_for_version(config: &Config, plugin: &Plugin, version: &str) -> Result<Vec<PathBuf>> {
    let install = install_path(config, plugin, &VersionType::Version, version);
    generate(config, plugin, version, &install)
}

/// Write shims for every installed version of `plugin`.
///
/// Install directory names are decoded before being recorded, so a ref
/// install is registered the same way a resolved ref is spelled.
///
/// Returns the shim paths that changed.
pub fn generate_for_plugin(config: &Config, plugin: &Plugin) -> Result<Vec<PathBuf>> {
    let mut changed = Vec::new();
    for encoded in asdf_installs::installed(config, plugin)? {
        let install = install_directory(&config.data_dir, &plugin.name).join(&encoded);
        let (version_type, version) = decode_version(&encoded);
        let label = registration_version(&version_type, &version);
        changed.extend(generate(config, plugin, &label, &install)?);
    }
    Ok(changed)
}

fn generate(config: &Config, plugin: &Plugin, label: &str, install: &Path) -> Result<Vec<PathBuf>> {
    let mut changed = Vec::new();
    for executable in executables_in(plugin, install)? {
        if write(config, plugin, label, &executable)?
            && let Some(name) = executable.file_name()
        {
            changed.push(shims_directory(&config.data_dir).join(name));
        }
    }

    tracing::info!(
        plugin = %plugin.name,
        version = %label,
        changed = changed.len(),
        "Generated shims"
    );
    Ok(changed)
}

/// Load the shim named `shim_name`, if there is one.
pub fn read(config: &Config, shim_name: &str) -> Result<Option<Shim>> {
    let shim_path = path(config, shim_name);
    let content = match asdf_fs::io::read_text(&shim_path) {
        Ok(content) => content,
        Err(e) if e.is_not_found() => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    Shim::parse(&content)
        .map(Some)
        .map_err(|message| Error::MalformedShim {
            path: shim_path,
            message,
        })
}
