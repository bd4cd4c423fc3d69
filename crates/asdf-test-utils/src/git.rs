//! Plugin git repository fixtures.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Location of the dummy plugin fixture shipped with the workspace.
pub fn dummy_plugin_fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/dummy_plugin")
}

/// Run `git <args>` in `dir`, panicking with stderr on failure.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap_or_else(|e| panic!("failed to run `git {args:?}`: {e}"));
    if !output.status.success() {
        panic!(
            "`git {args:?}` failed:\n{}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Recursively copy `src` into `dst`, keeping permission bits.
pub fn copy_dir(src: &Path, dst: &Path) {
    fs::create_dir_all(dst).unwrap();
    for entry in fs::read_dir(src).unwrap() {
        let entry = entry.unwrap();
        let target = dst.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
}

/// Build a plugin git repository at `<dir>/repo-<name>` from the dummy
/// plugin fixture.
///
/// The repository has two commits (fixture import, then a changelog) and an
/// `origin` remote pointing at itself, so clones can be updated offline.
/// Returns the repository path, usable as a clone URL.
///
/// # Panics
/// Panics if any filesystem or git operation fails.
pub fn mock_plugin_repo(dir: &Path, name: &str) -> PathBuf {
    let location = dir.join(format!("repo-{name}"));
    copy_dir(&dummy_plugin_fixture(), &location);

    // Checkouts may lose the execute bit on fixture scripts
    for entry in fs::read_dir(location.join("bin")).unwrap() {
        let path = entry.unwrap().path();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    git(&location, &["init", "-q"]);
    git(&location, &["config", "user.email", "test@example.com"]);
    git(&location, &["config", "user.name", "Test"]);
    git(&location, &["config", "commit.gpgsign", "false"]);
    git(&location, &["add", "-A"]);
    git(&location, &["commit", "-q", "-m", &format!("asdf {name} plugin init")]);

    fs::write(location.join("CHANGELOG.md"), "# Changelog\n").unwrap();
    git(&location, &["add", "-A"]);
    git(&location, &["commit", "-q", "-m", &format!("asdf {name} plugin changelog")]);

    let location_str = location.to_string_lossy().into_owned();
    git(&location, &["remote", "add", "origin", &location_str]);

    location
}

/// Add a commit to a mock plugin repository and return its hash.
pub fn commit_file(repo: &Path, file: &str, content: &str) -> String {
    fs::write(repo.join(file), content).unwrap();
    git(repo, &["add", "-A"]);
    git(repo, &["commit", "-q", "-m", &format!("update {file}")]);
    git(repo, &["rev-parse", "HEAD"])
}
