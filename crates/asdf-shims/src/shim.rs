//! In-memory form of a shim file
//!
//! ```text
//! #!/usr/bin/env bash
//! # asdf-plugin: <plugin> <version>      <- newest first, no duplicates
//! # asdf-plugin: <plugin> <version>
//! exec asdf exec "<executable>" "$@"     <- trailer, kept verbatim
//! ```
//!
//! Parsing and rendering go through [`Shim`] so merging registrations is a
//! list operation instead of text splicing.

use std::fmt;

/// Interpreter line every generated shim starts with.
pub const SHEBANG: &str = "#!/usr/bin/env bash";

/// Prefix of a metadata line.
pub const METADATA_PREFIX: &str = "# asdf-plugin: ";

/// One `(plugin, version)` pair known to provide the shimmed executable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShimRegistration {
    pub plugin: String,
    pub version: String,
}

impl ShimRegistration {
    /// Whether the pair can be written as a single metadata line that
    /// parses back to the same pair.
    pub fn is_valid(plugin: &str, version: &str) -> bool {
        !plugin.is_empty()
            && !version.is_empty()
            && !plugin.chars().any(|c| c.is_whitespace() || c.is_control())
            && !version.chars().any(char::is_control)
    }
}

impl fmt::Display for ShimRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} {}", METADATA_PREFIX, self.plugin, self.version)
    }
}

/// A parsed shim file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shim {
    shebang: String,
    registrations: Vec<ShimRegistration>,
    trailer: String,
}

impl Shim {
    /// A shim for `executable` with no registrations yet.
    pub fn new(executable: &str) -> Self {
        Self {
            shebang: SHEBANG.to_string(),
            registrations: Vec::new(),
            trailer: format!("exec asdf exec \"{executable}\" \"$@\""),
        }
    }

    /// Parse shim file content.
    ///
    /// The first line must be an interpreter line. Metadata lines directly
    /// after it become registrations; everything from the first other line
    /// on is the trailer.
    pub fn parse(content: &str) -> Result<Self, String> {
        let (shebang, mut rest) = split_line(content);
        if !shebang.starts_with("#!") {
            return Err("missing interpreter line".to_string());
        }

        let mut registrations = Vec::new();
        loop {
            let (line, after) = split_line(rest);
            let Some(metadata) = line.strip_prefix(METADATA_PREFIX) else {
                break;
            };
            let (plugin, version) = metadata
                .split_once(' ')
                .filter(|(plugin, version)| !plugin.is_empty() && !version.is_empty())
                .ok_or_else(|| format!("invalid metadata line: {line}"))?;
            registrations.push(ShimRegistration {
                plugin: plugin.to_string(),
                version: version.to_string(),
            });
            rest = after;
        }

        if rest.trim().is_empty() {
            return Err("missing exec line".to_string());
        }

        Ok(Self {
            shebang: shebang.to_string(),
            registrations,
            trailer: rest.to_string(),
        })
    }

    /// Render the shim back into file content.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(64 + self.registrations.len() * 32);
        out.push_str(&self.shebang);
        out.push('\n');
        for registration in &self.registrations {
            out.push_str(&registration.to_string());
            out.push('\n');
        }
        out.push_str(&self.trailer);
        out
    }

    /// Record that `plugin` at `version` provides this executable.
    ///
    /// New registrations go first. Returns `false` if the pair was already
    /// registered, in which case nothing changes.
    pub fn register(&mut self, plugin: &str, version: &str) -> bool {
        if self
            .registrations
            .iter()
            .any(|r| r.plugin == plugin && r.version == version)
        {
            return false;
        }

        self.registrations.insert(
            0,
            ShimRegistration {
                plugin: plugin.to_string(),
                version: version.to_string(),
            },
        );
        true
    }

    /// Registrations, newest first.
    pub fn registrations(&self) -> &[ShimRegistration] {
        &self.registrations
    }

    /// Distinct plugin names, in registration order.
    pub fn plugins(&self) -> Vec<&str> {
        let mut plugins: Vec<&str> = Vec::new();
        for registration in &self.registrations {
            if !plugins.contains(&registration.plugin.as_str()) {
                plugins.push(&registration.plugin);
            }
        }
        plugins
    }

    pub fn trailer(&self) -> &str {
        &self.trailer
    }
}

fn split_line(s: &str) -> (&str, &str) {
    s.split_once('\n').unwrap_or((s, ""))
}
