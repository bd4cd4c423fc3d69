//! [`TestDataDir`] builder for data-directory test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use asdf_fs::{Config, install_directory, plugin_directory};
use tempfile::TempDir;

use crate::git::{git, mock_plugin_repo};

/// A temporary data directory with helpers to install plugins and versions.
///
/// # Example
///
/// ```rust,no_run
/// use asdf_test_utils::TestDataDir;
///
/// let data = TestDataDir::new();
/// data.install_plugin("lua");
/// data.install_version("lua", "1.1.0");
/// data.assert_file_exists("installs/lua/1.1.0/bin/dummy");
/// ```
pub struct TestDataDir {
    temp_dir: TempDir,
}

impl Default for TestDataDir {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDataDir {
    /// Create an empty temporary data directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Root of the data directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Config rooted at this data directory.
    pub fn config(&self) -> Config {
        Config::new(self.root())
    }

    /// Create a mock plugin repository next to the data directory contents
    /// (under `<root>/repos`) and return its path.
    pub fn plugin_repo(&self, name: &str) -> PathBuf {
        let repos = self.root().join("repos");
        fs::create_dir_all(&repos).unwrap();
        mock_plugin_repo(&repos, name)
    }

    /// Clone the dummy plugin into `plugins/<name>` with the git CLI.
    ///
    /// Returns the plugin directory.
    pub fn install_plugin(&self, name: &str) -> PathBuf {
        let repo = self.plugin_repo(name);
        let dest = plugin_directory(self.root(), name);
        fs::create_dir_all(dest.parent().unwrap()).unwrap();
        git(
            self.root(),
            &["clone", "-q", &repo.to_string_lossy(), &dest.to_string_lossy()],
        );
        dest
    }

    /// Install `version` of plugin `name` by running the plugin's `install`
    /// script against `installs/<name>/<version>`.
    ///
    /// Returns the install path.
    pub fn install_version(&self, name: &str, version: &str) -> PathBuf {
        let install_path = install_directory(self.root(), name).join(version);
        let script = plugin_directory(self.root(), name).join("bin/install");

        let output = Command::new("bash")
            .arg(&script)
            .env("ASDF_INSTALL_TYPE", "version")
            .env("ASDF_INSTALL_VERSION", version)
            .env("ASDF_INSTALL_PATH", &install_path)
            .output()
            .unwrap_or_else(|e| panic!("failed to run {}: {e}", script.display()));
        if !output.status.success() {
            panic!(
                "install of {name} {version} failed:\n{}",
                String::from_utf8_lossy(&output.stderr)
            );
        }
        install_path
    }

    /// Write an executable `list-bin-paths` callback printing `dirs`.
    pub fn write_list_bin_paths(&self, name: &str, dirs: &str) {
        use std::os::unix::fs::PermissionsExt;

        let path = plugin_directory(self.root(), name).join("bin/list-bin-paths");
        fs::write(&path, format!("echo '{dirs}'")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o777)).unwrap();
    }

    /// Assert that `path` (relative to the data dir) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the data dir) does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }
}
