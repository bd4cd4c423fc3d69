//! Names of the top-level directories inside the data directory.

use std::path::Path;

/// Standard directories rooted at the data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataPath {
    /// `plugins/` - one git working tree per plugin
    Plugins,
    /// `installs/` - populated by the install step, one dir per plugin
    Installs,
    /// `downloads/` - populated by the download step, one dir per plugin
    Downloads,
    /// `shims/` - generated dispatch scripts, one file per executable name
    Shims,
}

impl DataPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plugins => "plugins",
            Self::Installs => "installs",
            Self::Downloads => "downloads",
            Self::Shims => "shims",
        }
    }
}

impl AsRef<Path> for DataPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for DataPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for DataPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
