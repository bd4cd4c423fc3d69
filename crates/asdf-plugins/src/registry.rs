//! Plugin registry backed by git clones under `<data_dir>/plugins`
//!
//! Names are validated before any filesystem access so a malformed name can
//! neither traverse out of the plugins directory nor leak whether a path
//! exists. Nothing here is transactional: a failed step leaves whatever was
//! already done in place, and every operation is safe to re-run.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::sync::LazyLock;

use asdf_fs::{Config, plugins_directory};
use regex::Regex;

use crate::callback::Callback;
use crate::{Error, Plugin, Result, git, plugin_exists};

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_-]+$").expect("Invalid plugin name regex"));

/// Env var carrying the plugin directory to `post-plugin-update`.
pub const PLUGIN_PATH_ENV: &str = "ASDF_PLUGIN_PATH";
/// Env var carrying the ref checked out before the update.
pub const PREV_REF_ENV: &str = "ASDF_PLUGIN_PREV_REF";
/// Env var carrying the ref checked out after the update.
pub const POST_REF_ENV: &str = "ASDF_PLUGIN_POST_REF";

/// Check that `name` only contains lowercase letters, digits, `_` and `-`.
pub fn validate_name(name: &str) -> Result<()> {
    if NAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(Error::InvalidName {
            name: name.to_string(),
        })
    }
}

/// Clone `url` as plugin `name`.
///
/// # Errors
///
/// - [`Error::InvalidName`] before anything else
/// - [`Error::AlreadyExists`] if the plugin directory is already there
/// - [`Error::CloneFailed`] if the repository cannot be cloned
pub fn add(config: &Config, name: &str, url: &str) -> Result<Plugin> {
    validate_name(name)?;

    if plugin_exists(&config.data_dir, name)? {
        return Err(Error::AlreadyExists {
            name: name.to_string(),
        });
    }

    let plugin = Plugin::new(config, name);
    git::clone_repo(url, &plugin.dir)?;

    tracing::info!(plugin = %name, url = %url, "Plugin added");
    Ok(plugin)
}

/// List installed plugins sorted by name.
///
/// `with_urls` and `with_refs` each open the plugin's repository to fill in
/// the corresponding field; when both are false no git access happens.
pub fn list(config: &Config, with_urls: bool, with_refs: bool) -> Result<Vec<Plugin>> {
    let plugins_dir = plugins_directory(&config.data_dir);
    let entries = match fs::read_dir(&plugins_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(asdf_fs::Error::io(plugins_dir, e).into()),
    };

    let mut plugins = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| asdf_fs::Error::io(&plugins_dir, e))?;
        let file_type = entry
            .file_type()
            .map_err(|e| asdf_fs::Error::io(entry.path(), e))?;
        if !file_type.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        let mut plugin = Plugin::new(config, &name);

        if with_urls || with_refs {
            let repo = git::open(&plugin.dir)?;
            if with_urls {
                plugin.url = git::remote_url(&repo)?;
            }
            if with_refs {
                plugin.git_ref = Some(git::head_ref(&repo)?);
            }
        }

        plugins.push(plugin);
    }

    plugins.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(plugins)
}

/// Delete plugin `name` and its whole working tree.
///
/// Installs and shims referencing the plugin are left alone.
pub fn remove(config: &Config, name: &str) -> Result<()> {
    validate_name(name)?;

    if !plugin_exists(&config.data_dir, name)? {
        return Err(Error::NotFound {
            name: name.to_string(),
        });
    }

    let plugin = Plugin::new(config, name);
    fs::remove_dir_all(&plugin.dir).map_err(|e| asdf_fs::Error::io(&plugin.dir, e))?;

    tracing::info!(plugin = %name, "Plugin removed");
    Ok(())
}

/// Update plugin `name` to `git_ref`, or to the tip of the remote's default
/// branch when `git_ref` is `None` or empty. Returns the new commit hash.
///
/// After the git update, the plugin's `post-plugin-update` callback runs with
/// `ASDF_PLUGIN_PATH`, `ASDF_PLUGIN_PREV_REF` and `ASDF_PLUGIN_POST_REF` set.
/// A missing callback is fine. A failing one yields
/// [`Error::PostUpdateCallback`]; the update itself stays applied.
pub fn update(
    config: &Config,
    name: &str,
    git_ref: Option<&str>,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<String> {
    validate_name(name)?;

    if !plugin_exists(&config.data_dir, name)? {
        return Err(Error::NotFound {
            name: name.to_string(),
        });
    }

    let plugin = Plugin::new(config, name);
    let repo = git::open(&plugin.dir)?;
    let previous_ref = git::head_ref(&repo)?;
    let new_ref = git::update(&repo, git_ref.filter(|r| !r.is_empty()))?;

    tracing::info!(
        plugin = %name,
        from = %previous_ref,
        to = %new_ref,
        "Plugin updated"
    );

    let env = HashMap::from([
        (PLUGIN_PATH_ENV.to_string(), plugin.dir.display().to_string()),
        (PREV_REF_ENV.to_string(), previous_ref),
        (POST_REF_ENV.to_string(), new_ref.clone()),
    ]);

    match plugin.run_callback(
        Callback::PostPluginUpdate.as_str(),
        &[],
        &env,
        stdout,
        stderr,
    ) {
        Ok(()) => {}
        Err(e) if e.is_no_callback() => {
            tracing::debug!(plugin = %name, "No post-plugin-update callback");
        }
        Err(e) => {
            return Err(Error::PostUpdateCallback {
                name: name.to_string(),
                new_ref,
                source: Box::new(e),
            });
        }
    }

    Ok(new_ref)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_validate_name_accepts_valid() {
        for name in ["lua", "nodejs", "python-3", "my_plugin", "0"] {
            assert!(validate_name(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_validate_name_rejects_invalid() {
        for name in ["plugin^name", "plugin%name", "plugin name", "PLUGIN_NAME", "", "a/b", ".."] {
            let err = validate_name(name).unwrap_err();
            assert!(matches!(err, Error::InvalidName { .. }), "{name} should be invalid");
        }
    }

    proptest! {
        #[test]
        fn prop_valid_charset_always_accepted(name in "[a-z0-9_-]{1,32}") {
            prop_assert!(validate_name(&name).is_ok());
        }

        #[test]
        fn prop_any_foreign_char_rejected(
            prefix in "[a-z0-9_-]{0,8}",
            bad in "[^a-z0-9_-]",
            suffix in "[a-z0-9_-]{0,8}",
        ) {
            let name = format!("{prefix}{bad}{suffix}");
            prop_assert!(validate_name(&name).is_err());
        }
    }
}
