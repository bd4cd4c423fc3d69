//! Shim-versions command implementation

use asdf_fs::Config;

use crate::error::{CliError, Result};

/// Run the shim-versions command.
///
/// Prints one `<plugin> <version>` line per registration, newest first.
pub fn run_shim_versions(config: &Config, command: &str) -> Result<()> {
    validate_command(command)?;

    let shim = asdf_shims::read(config, command)?
        .ok_or_else(|| CliError::user(format!("unknown command: {command}. No shim found")))?;

    for registration in shim.registrations() {
        println!("{} {}", registration.plugin, registration.version);
    }
    Ok(())
}

/// A command name must be a single entry of the shims directory.
fn validate_command(command: &str) -> Result<()> {
    if command.is_empty() || command == "." || command == ".." || command.contains('/') {
        return Err(CliError::user(format!("invalid command name: {command}")));
    }
    Ok(())
}
