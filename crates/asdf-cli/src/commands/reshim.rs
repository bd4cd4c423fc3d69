//! Reshim command implementation

use colored::Colorize;

use asdf_fs::Config;
use asdf_installs::{VersionType, is_installed};
use asdf_plugins::{Plugin, plugin_exists, validate_name};

use crate::error::{CliError, Result};

/// Run the reshim command.
///
/// With a version, only that installed version is shimmed; otherwise every
/// installed version of the plugin is.
pub fn run_reshim(config: &Config, name: &str, version: Option<&str>) -> Result<()> {
    validate_name(name)?;
    if !plugin_exists(&config.data_dir, name)? {
        return Err(asdf_plugins::Error::NotFound {
            name: name.to_string(),
        }
        .into());
    }

    let plugin = Plugin::new(config, name);
    let changed = match version {
        Some(version) => {
            if !is_installed(config, &plugin, &VersionType::Version, version) {
                return Err(CliError::user(format!(
                    "{name} {version} is not installed"
                )));
            }
            asdf_shims::generate_for_version(config, &plugin, version)?
        }
        None => asdf_shims::generate_for_plugin(config, &plugin)?,
    };

    for shim in &changed {
        println!("  {} {}", "+".green(), shim.display());
    }
    println!(
        "{} Reshimmed {} ({} shims changed)",
        "OK".green().bold(),
        name.cyan(),
        changed.len()
    );
    Ok(())
}
