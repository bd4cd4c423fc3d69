//! Canonical paths inside the data directory
//!
//! Pure path composition, no I/O. Names are used verbatim as path segments,
//! so callers validate plugin names before handing them in.

use std::path::{Path, PathBuf};

use crate::DataPath;

/// `<data_dir>/plugins`
pub fn plugins_directory(data_dir: &Path) -> PathBuf {
    data_dir.join(DataPath::Plugins)
}

/// `<data_dir>/plugins/<name>`
pub fn plugin_directory(data_dir: &Path, name: &str) -> PathBuf {
    plugins_directory(data_dir).join(name)
}

/// `<data_dir>/installs/<plugin>`
pub fn install_directory(data_dir: &Path, plugin: &str) -> PathBuf {
    data_dir.join(DataPath::Installs).join(plugin)
}

/// `<data_dir>/downloads/<plugin>`
pub fn download_directory(data_dir: &Path, plugin: &str) -> PathBuf {
    data_dir.join(DataPath::Downloads).join(plugin)
}

/// `<data_dir>/shims`
pub fn shims_directory(data_dir: &Path) -> PathBuf {
    data_dir.join(DataPath::Shims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_directory_has_name_as_last_segment() {
        let dir = plugin_directory(Path::new("/home/user/.asdf"), "lua");
        assert_eq!(dir, PathBuf::from("/home/user/.asdf/plugins/lua"));
    }

    #[test]
    fn test_install_and_download_directories() {
        let data = Path::new("/data");
        assert_eq!(install_directory(data, "lua"), PathBuf::from("/data/installs/lua"));
        assert_eq!(download_directory(data, "lua"), PathBuf::from("/data/downloads/lua"));
    }

    #[test]
    fn test_shims_directory() {
        assert_eq!(shims_directory(Path::new("/data")), PathBuf::from("/data/shims"));
    }
}
