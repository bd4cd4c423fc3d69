//! Error types for asdf-shims

use std::path::PathBuf;

/// Result type for asdf-shims operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while discovering executables or writing shims
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed shim at {path}: {message}")]
    MalformedShim { path: PathBuf, message: String },

    #[error("Cannot record {plugin:?} {version:?} in a shim: names must be non-empty and free of line breaks")]
    InvalidRegistration { plugin: String, version: String },

    #[error("Executable path has no usable file name: {path}")]
    InvalidExecutable { path: PathBuf },

    #[error(transparent)]
    Plugin(#[from] asdf_plugins::Error),

    #[error(transparent)]
    Fs(#[from] asdf_fs::Error),
}
