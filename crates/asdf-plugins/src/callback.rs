//! Plugin callback protocol
//!
//! A callback is an optional executable script at `<plugin>/bin/<name>`.
//! Absence is reported as [`Error::NoCallback`] so callers can treat hooks as
//! optional without inspecting OS errors. Present scripts run as blocking
//! child processes: arguments are appended verbatim, the caller's environment
//! map is layered over the inherited process environment, and the captured
//! stdout/stderr bytes are handed to the caller's sinks before returning,
//! also when the script fails.

use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::{CallbackFailure, Error, Plugin, Result};

/// Runs the script named by `$0` with the remaining arguments. Going through
/// bash lets scripts without a shebang line run as shell scripts.
const LAUNCHER: &str = r#""$0" "$@""#;

/// Callbacks with a meaning to asdf itself.
///
/// Any other name can still be run through [`Plugin::run_callback`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Callback {
    /// Prints space-separated directories (relative to an install) holding executables
    ListBinPaths,
    /// Runs after a plugin update, with previous and new git refs in the env
    PostPluginUpdate,
    /// Prints every installable version
    ListAll,
    /// Downloads a version into the download path
    Download,
    /// Installs a version into the install path
    Install,
    /// Prints the latest stable version
    LatestStable,
    /// Prints plugin help text
    HelpOverview,
}

impl Callback {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ListBinPaths => "list-bin-paths",
            Self::PostPluginUpdate => "post-plugin-update",
            Self::ListAll => "list-all",
            Self::Download => "download",
            Self::Install => "install",
            Self::LatestStable => "latest-stable",
            Self::HelpOverview => "help.overview",
        }
    }

    /// Parse a callback from its script name
    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|c| c.as_str() == s)
    }

    pub fn all() -> &'static [Callback] {
        &[
            Self::ListBinPaths,
            Self::PostPluginUpdate,
            Self::ListAll,
            Self::Download,
            Self::Install,
            Self::LatestStable,
            Self::HelpOverview,
        ]
    }
}

impl fmt::Display for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Plugin {
    /// Look up the script implementing `callback`.
    ///
    /// Returns `None` when the script is missing or not executable.
    pub fn callback(&self, callback: &str) -> Option<PathBuf> {
        let path = self.callback_path(callback);
        asdf_fs::io::is_executable_file(&path).then_some(path)
    }

    /// Whether the plugin implements `callback`.
    pub fn has_callback(&self, callback: Callback) -> bool {
        self.callback(callback.as_str()).is_some()
    }

    /// Run the callback script named `callback`.
    ///
    /// # Errors
    ///
    /// - [`Error::NoCallback`] if the plugin has no executable script by that name
    /// - [`Error::CallbackExecution`] if the script cannot be launched or exits non-zero;
    ///   whatever it printed has already been written to the sinks
    /// - [`Error::Sink`] if a sink rejects the output
    pub fn run_callback(
        &self,
        callback: &str,
        args: &[&str],
        env: &HashMap<String, String>,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Result<()> {
        let script = self.callback(callback).ok_or_else(|| Error::NoCallback {
            plugin: self.name.clone(),
            callback: callback.to_string(),
        })?;

        tracing::debug!(
            plugin = %self.name,
            callback = %callback,
            script = %script.display(),
            "Running plugin callback"
        );

        let output = Command::new("bash")
            .arg("-c")
            .arg(LAUNCHER)
            .arg(&script)
            .args(args)
            .envs(env)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.execution_error(callback, CallbackFailure::Launch(e)))?;

        stdout.write_all(&output.stdout).map_err(Error::Sink)?;
        stderr.write_all(&output.stderr).map_err(Error::Sink)?;

        if !output.status.success() {
            tracing::debug!(
                plugin = %self.name,
                callback = %callback,
                exit_code = ?output.status.code(),
                "Plugin callback failed"
            );
            return Err(self.execution_error(callback, CallbackFailure::Exit(output.status)));
        }

        Ok(())
    }

    fn execution_error(&self, callback: &str, source: CallbackFailure) -> Error {
        Error::CallbackExecution {
            plugin: self.name.clone(),
            callback: callback.to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn plugin_with_script(name: &str, body: &str, mode: u32) -> (TempDir, Plugin) {
        let temp = TempDir::new().unwrap();
        let config = asdf_fs::Config::new(temp.path());
        let plugin = Plugin::new(&config, "lua");
        fs::create_dir_all(plugin.dir.join("bin")).unwrap();
        let path = plugin.callback_path(name);
        fs::write(&path, body).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
        (temp, plugin)
    }

    fn run(plugin: &Plugin, name: &str, args: &[&str]) -> (Result<()>, String, String) {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let result = plugin.run_callback(name, args, &HashMap::new(), &mut stdout, &mut stderr);
        (
            result,
            String::from_utf8(stdout).unwrap(),
            String::from_utf8(stderr).unwrap(),
        )
    }

    #[test]
    fn test_callback_roundtrip() {
        for callback in Callback::all() {
            assert_eq!(Callback::parse(callback.as_str()), Some(*callback));
            assert_eq!(callback.to_string(), callback.as_str());
        }
        assert_eq!(Callback::parse("bogus"), None);
    }

    #[test]
    fn test_missing_script_is_no_callback() {
        let (_temp, plugin) = plugin_with_script("debug", "#!/usr/bin/env bash\n", 0o755);
        let (result, _, _) = run(&plugin, "non-existent", &[]);

        let err = result.unwrap_err();
        assert!(err.is_no_callback());
        assert_eq!(
            err.to_string(),
            "Plugin named lua does not have a callback named non-existent"
        );
    }

    #[test]
    fn test_non_executable_script_is_no_callback() {
        let (_temp, plugin) = plugin_with_script("list-bin-paths", "echo bin\n", 0o644);
        assert!(!plugin.has_callback(Callback::ListBinPaths));

        let (result, stdout, _) = run(&plugin, "list-bin-paths", &[]);
        assert!(result.unwrap_err().is_no_callback());
        assert!(stdout.is_empty());
    }

    #[test]
    fn test_script_without_shebang_runs_as_shell() {
        let (_temp, plugin) = plugin_with_script("list-bin-paths", "echo 'foo bar'", 0o755);
        let (result, stdout, stderr) = run(&plugin, "list-bin-paths", &[]);

        result.unwrap();
        assert_eq!(stdout, "foo bar\n");
        assert_eq!(stderr, "");
    }

    #[test]
    fn test_stdout_and_stderr_captured_exactly() {
        let body = "#!/usr/bin/env bash\nprintf 'out'\nprintf 'err' >&2\n";
        let (_temp, plugin) = plugin_with_script("debug", body, 0o755);
        let (result, stdout, stderr) = run(&plugin, "debug", &[]);

        result.unwrap();
        assert_eq!(stdout, "out");
        assert_eq!(stderr, "err");
    }

    #[test]
    fn test_arguments_with_spaces_are_preserved() {
        let body = "#!/usr/bin/env bash\nfor arg in \"$@\"; do echo \"[$arg]\"; done\n";
        let (_temp, plugin) = plugin_with_script("debug", body, 0o755);
        let (result, stdout, _) = run(&plugin, "debug", &["123", "test string"]);

        result.unwrap();
        assert_eq!(stdout, "[123]\n[test string]\n");
    }

    #[test]
    fn test_env_is_layered_over_process_env() {
        let body = "#!/usr/bin/env bash\necho \"$ASDF_TEST_VALUE ${PATH:+has-path}\"\n";
        let (_temp, plugin) = plugin_with_script("debug", body, 0o755);
        let env = HashMap::from([("ASDF_TEST_VALUE".to_string(), "given".to_string())]);

        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        plugin
            .run_callback("debug", &[], &env, &mut stdout, &mut stderr)
            .unwrap();

        assert_eq!(String::from_utf8(stdout).unwrap(), "given has-path\n");
    }

    #[test]
    fn test_non_zero_exit_keeps_partial_output() {
        let body = "#!/usr/bin/env bash\necho partial\necho 'going down' >&2\nexit 3\n";
        let (_temp, plugin) = plugin_with_script("install", body, 0o755);
        let (result, stdout, stderr) = run(&plugin, "install", &[]);

        let err = result.unwrap_err();
        assert!(matches!(
            err,
            Error::CallbackExecution {
                source: CallbackFailure::Exit(status),
                ..
            } if status.code() == Some(3)
        ));
        assert!(!err.is_no_callback());
        assert_eq!(stdout, "partial\n");
        assert_eq!(stderr, "going down\n");
    }
}
