//! Error types for asdf-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from asdf-plugins
    #[error(transparent)]
    Plugin(#[from] asdf_plugins::Error),

    /// Error from asdf-shims
    #[error(transparent)]
    Shim(#[from] asdf_shims::Error),

    /// Error from asdf-fs
    #[error(transparent)]
    Fs(#[from] asdf_fs::Error),

    /// JSON output error
    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
