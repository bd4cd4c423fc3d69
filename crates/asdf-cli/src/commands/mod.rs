//! Command implementations for asdf-cli

pub mod plugin;
pub mod reshim;
pub mod shim_versions;

pub use plugin::{
    run_plugin_add, run_plugin_list, run_plugin_remove, run_plugin_update,
    run_plugin_update_all,
};
pub use reshim::run_reshim;
pub use shim_versions::run_shim_versions;
