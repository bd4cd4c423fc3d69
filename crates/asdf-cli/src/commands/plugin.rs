//! Plugin command implementations

use std::io;

use colored::Colorize;

use asdf_fs::Config;
use asdf_plugins::{Plugin, registry};

use crate::error::{CliError, Result};

const ADD_USAGE: &str = "usage: asdf plugin add <name> <git-url>";

/// Run the plugin add command.
///
/// Both arguments are required; there is no short-name plugin index.
pub fn run_plugin_add(config: &Config, name: Option<&str>, git_url: Option<&str>) -> Result<()> {
    let (Some(name), Some(git_url)) = (name, git_url) else {
        return Err(CliError::user(ADD_USAGE));
    };

    let plugin = registry::add(config, name, git_url)?;
    println!(
        "{} Added plugin {} from {}",
        "OK".green().bold(),
        plugin.name.cyan(),
        git_url.yellow()
    );
    Ok(())
}

/// Run the plugin list command.
pub fn run_plugin_list(config: &Config, urls: bool, refs: bool, json: bool) -> Result<()> {
    let plugins = registry::list(config, urls, refs)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plugins)?);
        return Ok(());
    }

    if plugins.is_empty() {
        eprintln!("No plugins installed");
        return Ok(());
    }

    for plugin in &plugins {
        println!("{}", format_list_line(plugin, urls, refs));
    }
    Ok(())
}

/// One plugin per line: the name, then tab-separated URL and ref columns.
fn format_list_line(plugin: &Plugin, urls: bool, refs: bool) -> String {
    let mut line = plugin.name.clone();
    if urls {
        line.push_str("\t\t");
        line.push_str(plugin.url.as_deref().unwrap_or_default());
    }
    if refs {
        line.push_str(if urls { "\t" } else { "\t\t" });
        line.push_str(plugin.git_ref.as_deref().unwrap_or_default());
    }
    line
}

/// Run the plugin remove command.
pub fn run_plugin_remove(config: &Config, name: &str) -> Result<()> {
    registry::remove(config, name)?;
    println!("{} Removed plugin {}", "OK".green().bold(), name.cyan());
    Ok(())
}

/// Run the plugin update command.
///
/// Hook output goes straight to the terminal.
pub fn run_plugin_update(config: &Config, name: &str, git_ref: Option<&str>) -> Result<()> {
    println!("{} Updating {}...", "=>".blue().bold(), name.cyan());

    let new_ref = registry::update(
        config,
        name,
        git_ref,
        &mut io::stdout(),
        &mut io::stderr(),
    )?;

    println!(
        "{} Updated {} to ref {}",
        "OK".green().bold(),
        name.cyan(),
        new_ref.yellow()
    );
    Ok(())
}

/// Run the plugin update command for every installed plugin.
///
/// Keeps going after a failure and reports how many plugins failed.
pub fn run_plugin_update_all(config: &Config) -> Result<()> {
    let plugins = registry::list(config, false, false)?;
    let mut failed = 0;

    for plugin in &plugins {
        if let Err(e) = run_plugin_update(config, &plugin.name, None) {
            eprintln!("{}: {}", "error".red().bold(), e);
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(CliError::user(format!(
            "{failed} of {} plugins failed to update",
            plugins.len()
        )));
    }
    Ok(())
}
