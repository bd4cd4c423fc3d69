//! asdf CLI
//!
//! Manages plugins, their installed versions and the shims that dispatch to
//! them.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use asdf_fs::Config;
use cli::{Cli, Commands, PluginAction};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    let Some(cmd) = cli.command else {
        println!("{} The multiple runtime version manager", "asdf".green().bold());
        println!();
        println!("Run {} for available commands.", "asdf --help".cyan());
        return Ok(());
    };

    let config = match cli.data_dir {
        Some(dir) => Config::new(dir),
        None => Config::load()?,
    };
    tracing::debug!(data_dir = %config.data_dir.display(), "Loaded config");

    execute_command(&config, cmd)
}

fn execute_command(config: &Config, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Plugin { action } => match action {
            PluginAction::Add { name, git_url } => {
                commands::run_plugin_add(config, name.as_deref(), git_url.as_deref())
            }
            PluginAction::List { urls, refs, json } => {
                commands::run_plugin_list(config, urls, refs, json)
            }
            PluginAction::Remove { name } => commands::run_plugin_remove(config, &name),
            PluginAction::Update { name, git_ref, all } => {
                if all {
                    commands::run_plugin_update_all(config)
                } else {
                    // clap guarantees a name without --all
                    let name = name.unwrap_or_default();
                    commands::run_plugin_update(config, &name, git_ref.as_deref())
                }
            }
        },
        Commands::Reshim { name, version } => {
            commands::run_reshim(config, &name, version.as_deref())
        }
        Commands::ShimVersions { command } => commands::run_shim_versions(config, &command),
    }
}
