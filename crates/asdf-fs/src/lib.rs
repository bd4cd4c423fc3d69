//! Filesystem layer for asdf
//!
//! Maps the data directory onto canonical plugin, install, download and shim
//! paths, loads the runtime [`Config`], and provides the locked
//! read-modify-write primitive used for shim files.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod layout;

pub use config::Config;
pub use constants::DataPath;
pub use error::{Error, Result};
pub use layout::{
    download_directory, install_directory, plugin_directory, plugins_directory, shims_directory,
};
