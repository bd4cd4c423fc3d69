//! Version types and their filesystem encoding
//!
//! Two versions of different kinds with the same literal string (a `ref`
//! named `1.0` and a release `1.0`) must never share an install directory,
//! so non-default kinds are prefixed with their type.

use std::fmt;

/// Kind of version string handed over by version resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionType {
    /// A released version; the implicit default
    Version,
    /// A git ref of the tool's source
    Ref,
    /// A user-supplied filesystem path, bypassing the data directory
    Path,
    /// Any other type, opaque except for encoding
    Other(String),
}

impl VersionType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Version => "version",
            Self::Ref => "ref",
            Self::Path => "path",
            Self::Other(other) => other,
        }
    }
}

impl From<&str> for VersionType {
    fn from(s: &str) -> Self {
        match s {
            "version" => Self::Version,
            "ref" => Self::Ref,
            "path" => Self::Path,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for VersionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encode `(version_type, version)` as a single path segment.
///
/// `Version` encodes as the bare version, every other type as
/// `<type>-<version>`. `%` and `/` are escaped so the token never spans
/// directories. `Path` versions never reach the filesystem through this
/// token; they are encoded like any other type for completeness.
pub fn encode_version(version_type: &VersionType, version: &str) -> String {
    let escaped = version.replace('%', "%25").replace('/', "%2F");
    match version_type {
        VersionType::Version => escaped,
        other => format!("{}-{}", other.as_str(), escaped),
    }
}

/// Decode a token produced by [`encode_version`].
///
/// Only the `ref-` prefix is recognised; anything else is a plain version.
pub fn decode_version(token: &str) -> (VersionType, String) {
    let (version_type, rest) = match token.strip_prefix("ref-") {
        Some(rest) => (VersionType::Ref, rest),
        None => (VersionType::Version, token),
    };
    (version_type, rest.replace("%2F", "/").replace("%25", "%"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_plain_version_is_unchanged() {
        assert_eq!(encode_version(&VersionType::Version, "1.2.3"), "1.2.3");
    }

    #[test]
    fn test_ref_is_prefixed() {
        assert_eq!(encode_version(&VersionType::Ref, "1.2.3"), "ref-1.2.3");
    }

    #[test]
    fn test_other_type_is_prefixed_with_its_name() {
        let token = encode_version(&VersionType::from("nightly"), "2024-01-01");
        assert_eq!(token, "nightly-2024-01-01");
    }

    #[test]
    fn test_slash_does_not_create_directories() {
        let token = encode_version(&VersionType::Ref, "feature/new-parser");
        assert_eq!(token, "ref-feature%2Fnew-parser");
        assert!(!token.contains('/'));
        assert_eq!(
            decode_version(&token),
            (VersionType::Ref, "feature/new-parser".to_string())
        );
    }

    #[test]
    fn test_version_type_from_str() {
        assert_eq!(VersionType::from("version"), VersionType::Version);
        assert_eq!(VersionType::from("ref"), VersionType::Ref);
        assert_eq!(VersionType::from("path"), VersionType::Path);
        assert_eq!(VersionType::from("system").to_string(), "system");
    }

    proptest! {
        #[test]
        fn prop_ref_and_version_never_collide(version in "[ -~]{1,24}") {
            let as_version = encode_version(&VersionType::Version, &version);
            let as_ref = encode_version(&VersionType::Ref, &version);
            prop_assert_ne!(as_version, as_ref);
        }

        #[test]
        fn prop_ref_decodes_to_original(version in "[ -~]{1,24}") {
            let token = encode_version(&VersionType::Ref, &version);
            prop_assert!(!token.contains('/'));
            prop_assert_eq!(decode_version(&token), (VersionType::Ref, version));
        }
    }
}
