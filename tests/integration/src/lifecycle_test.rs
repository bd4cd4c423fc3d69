//! End-to-end plugin lifecycle
//!
//! Exercises the complete flow: add plugin -> install versions -> generate
//! shims -> update plugin -> remove plugin.

use std::fs;
use std::io;

use asdf_installs::{VersionType, download_path, install_path, installed, is_installed};
use asdf_plugins::{Plugin, registry};
use asdf_test_utils::TestDataDir;
use asdf_test_utils::git::{commit_file, git};
use pretty_assertions::assert_eq;

#[test]
fn test_full_plugin_lifecycle() {
    let data = TestDataDir::new();
    let config = data.config();
    let repo = data.plugin_repo("lua");

    // Add
    let plugin = registry::add(&config, "lua", &repo.to_string_lossy()).unwrap();
    assert_eq!(plugin, Plugin::new(&config, "lua"));
    let names: Vec<_> = registry::list(&config, false, false)
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["lua"]);

    // Install two versions
    for version in ["1.1.0", "2.0.0"] {
        let path = data.install_version("lua", version);
        assert_eq!(
            path,
            install_path(&config, &plugin, &VersionType::Version, version)
        );
        assert!(is_installed(&config, &plugin, &VersionType::Version, version));
    }
    assert_eq!(installed(&config, &plugin).unwrap(), vec!["1.1.0", "2.0.0"]);

    // Shim both
    asdf_shims::generate_for_version(&config, &plugin, "1.1.0").unwrap();
    asdf_shims::generate_for_version(&config, &plugin, "2.0.0").unwrap();
    assert_eq!(
        fs::read_to_string(asdf_shims::path(&config, "dummy")).unwrap(),
        "#!/usr/bin/env bash\n# asdf-plugin: lua 2.0.0\n# asdf-plugin: lua 1.1.0\nexec asdf exec \"dummy\" \"$@\""
    );

    // Update to a new upstream commit
    let upstream = commit_file(&repo, "NEWS.md", "new release\n");
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let new_ref = registry::update(&config, "lua", None, &mut stdout, &mut stderr).unwrap();
    assert_eq!(new_ref, upstream);
    assert_eq!(git(&plugin.dir, &["rev-parse", "HEAD"]), upstream);
    assert!(plugin.dir.join("NEWS.md").exists());
    assert!(
        String::from_utf8_lossy(&stdout).contains(&format!("new git-ref={upstream}")),
        "hook output: {}",
        String::from_utf8_lossy(&stdout)
    );

    // Reshim after update leaves existing registrations alone
    let changed = asdf_shims::generate_for_plugin(&config, &plugin).unwrap();
    assert!(changed.is_empty());

    // Remove leaves installs and shims behind
    registry::remove(&config, "lua").unwrap();
    assert!(registry::list(&config, false, false).unwrap().is_empty());
    data.assert_file_exists("installs/lua/2.0.0/bin/dummy");
    let shim = asdf_shims::read(&config, "dummy").unwrap().unwrap();
    assert_eq!(shim.plugins(), vec!["lua"]);
}

#[test]
fn test_two_plugins_share_a_shim() {
    let data = TestDataDir::new();
    let config = data.config();

    for name in ["python", "pypy"] {
        let repo = data.plugin_repo(name);
        registry::add(&config, name, &repo.to_string_lossy()).unwrap();
    }
    data.install_version("python", "3.12.0");
    data.install_version("pypy", "7.3.0");

    let python = Plugin::new(&config, "python");
    let pypy = Plugin::new(&config, "pypy");
    asdf_shims::generate_for_version(&config, &python, "3.12.0").unwrap();
    asdf_shims::generate_for_version(&config, &pypy, "7.3.0").unwrap();
    asdf_shims::generate_for_version(&config, &python, "3.12.0").unwrap();

    let shim = asdf_shims::read(&config, "other_bin").unwrap().unwrap();
    let registrations: Vec<_> = shim
        .registrations()
        .iter()
        .map(|r| format!("{} {}", r.plugin, r.version))
        .collect();
    assert_eq!(registrations, vec!["pypy 7.3.0", "python 3.12.0"]);
}

#[test]
fn test_path_versions_bypass_data_dir() {
    let data = TestDataDir::new();
    let config = data.config();
    let plugin = Plugin::new(&config, "lua");

    assert_eq!(
        install_path(&config, &plugin, &VersionType::Path, "/opt/tool"),
        std::path::PathBuf::from("/opt/tool")
    );
    assert_eq!(
        download_path(&config, &plugin, &VersionType::Path, "/opt/tool"),
        None
    );
}

#[test]
fn test_failed_hook_keeps_update() {
    let data = TestDataDir::new();
    let config = data.config();
    let repo = data.plugin_repo("lua");
    let plugin = registry::add(&config, "lua", &repo.to_string_lossy()).unwrap();

    let upstream = commit_file(
        &repo,
        "bin/post-plugin-update",
        "#!/usr/bin/env bash\necho broken >&2\nexit 1\n",
    );

    let mut stderr = Vec::new();
    let result = registry::update(&config, "lua", None, &mut io::sink(), &mut stderr);

    assert!(matches!(
        result,
        Err(asdf_plugins::Error::PostUpdateCallback { ref new_ref, .. }) if *new_ref == upstream
    ));
    assert_eq!(git(&plugin.dir, &["rev-parse", "HEAD"]), upstream);
    assert_eq!(String::from_utf8_lossy(&stderr), "broken\n");
}
