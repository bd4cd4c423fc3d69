use std::collections::HashMap;

use asdf_plugins::{Callback, Error, Plugin};
use asdf_test_utils::TestDataDir;
use pretty_assertions::assert_eq;

const PLUGIN: &str = "lua";

fn setup() -> (TestDataDir, Plugin) {
    let data = TestDataDir::new();
    data.install_plugin(PLUGIN);
    let plugin = Plugin::new(&data.config(), PLUGIN);
    (data, plugin)
}

fn run(
    plugin: &Plugin,
    callback: &str,
    args: &[&str],
    env: &HashMap<String, String>,
) -> (asdf_plugins::Result<()>, String, String) {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let result = plugin.run_callback(callback, args, env, &mut stdout, &mut stderr);
    (
        result,
        String::from_utf8(stdout).unwrap(),
        String::from_utf8(stderr).unwrap(),
    )
}

#[test]
fn test_missing_callback_names_plugin_and_callback() {
    let (_data, plugin) = setup();
    let (result, _, _) = run(&plugin, "non-existent", &[], &HashMap::new());

    match result.unwrap_err() {
        Error::NoCallback { plugin, callback } => {
            assert_eq!(plugin, "lua");
            assert_eq!(callback, "non-existent");
        }
        other => panic!("expected NoCallback, got {other:?}"),
    }
}

#[test]
fn test_passes_argument_to_command() {
    let (_data, plugin) = setup();
    let (result, stdout, stderr) = run(&plugin, "debug", &["123"], &HashMap::new());

    result.unwrap();
    assert_eq!(stdout, "123\n");
    assert_eq!(stderr, "");
}

#[test]
fn test_passes_arguments_to_command() {
    let (_data, plugin) = setup();
    let (result, stdout, stderr) = run(&plugin, "debug", &["123", "test string"], &HashMap::new());

    result.unwrap();
    assert_eq!(stdout, "123 test string\n");
    assert_eq!(stderr, "");
}

#[test]
fn test_passes_env_to_command() {
    let (_data, plugin) = setup();
    let env = HashMap::from([("ASDF_PLUGIN_PREV_REF".to_string(), "TEST".to_string())]);
    let (result, stdout, stderr) = run(&plugin, "post-plugin-update", &[], &env);

    result.unwrap();
    assert_eq!(stdout, "plugin updated path= old git-ref=TEST new git-ref=\n");
    assert_eq!(stderr, "");
}

#[test]
fn test_capability_lookup() {
    let (_data, plugin) = setup();

    assert!(plugin.has_callback(Callback::ListAll));
    assert!(plugin.has_callback(Callback::PostPluginUpdate));
    assert!(!plugin.has_callback(Callback::ListBinPaths));
    assert_eq!(
        plugin.callback(Callback::Install.as_str()),
        Some(plugin.dir.join("bin/install"))
    );
}
