//! Plugin registry and callback protocol for asdf
//!
//! A plugin is a git working tree under `<data_dir>/plugins/<name>` whose
//! `bin/` directory holds optional callback scripts. This crate manages the
//! set of plugins (add, list, remove, update) and invokes their callbacks.
//!
//! # Example
//!
//! ```no_run
//! use asdf_fs::Config;
//! use asdf_plugins::registry;
//!
//! # fn main() -> asdf_plugins::Result<()> {
//! let config = Config::load()?;
//! registry::add(&config, "lua", "https://github.com/Stratus3D/asdf-lua")?;
//! for plugin in registry::list(&config, true, false)? {
//!     println!("{} {}", plugin.name, plugin.url.unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```

pub mod callback;
pub mod error;
pub mod git;
pub mod plugin;
pub mod registry;

pub use callback::Callback;
pub use error::{CallbackFailure, Error, Result};
pub use plugin::{Plugin, plugin_exists};
pub use registry::validate_name;
