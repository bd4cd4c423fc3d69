//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};

/// The multiple runtime version manager
#[derive(Parser, Debug)]
#[command(name = "asdf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Data directory (defaults to ~/.asdf)
    #[arg(long, global = true, env = "ASDF_DATA_DIR", hide_env_values = true)]
    pub data_dir: Option<std::path::PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Manage plugins
    Plugin {
        #[command(subcommand)]
        action: PluginAction,
    },

    /// Recreate shims for a plugin's installed versions
    ///
    /// Examples:
    ///   asdf reshim nodejs           # Every installed version
    ///   asdf reshim nodejs 20.1.0    # One version
    Reshim {
        /// Plugin name
        name: String,

        /// Installed version to reshim
        version: Option<String>,
    },

    /// List the plugins and versions that provide a command
    ShimVersions {
        /// Command (shim) name
        command: String,
    },
}

/// Plugin subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum PluginAction {
    /// Add a plugin from a git repository
    ///
    /// Examples:
    ///   asdf plugin add lua https://github.com/Stratus3D/asdf-lua.git
    Add {
        /// Plugin name (lowercase letters, digits, '_' and '-')
        name: Option<String>,

        /// Git URL of the plugin repository
        git_url: Option<String>,
    },

    /// List installed plugins
    List {
        /// Show each plugin's repository URL
        #[arg(long)]
        urls: bool,

        /// Show each plugin's checked out commit
        #[arg(long)]
        refs: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Remove a plugin
    Remove {
        /// Plugin name
        name: String,
    },

    /// Update a plugin to the latest commit or a given ref
    ///
    /// Examples:
    ///   asdf plugin update lua            # Default branch tip
    ///   asdf plugin update lua v1.2.0     # Explicit ref
    ///   asdf plugin update --all          # Every plugin
    Update {
        /// Plugin name
        #[arg(required_unless_present = "all")]
        name: Option<String>,

        /// Branch, tag or commit to check out
        git_ref: Option<String>,

        /// Update every installed plugin to its default branch tip
        #[arg(long, conflicts_with_all = ["name", "git_ref"])]
        all: bool,
    },
}
