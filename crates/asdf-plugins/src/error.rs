//! Error types for asdf-plugins

use std::path::PathBuf;
use std::process::ExitStatus;

/// Result type for asdf-plugins operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in plugin registry and callback operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{name} is invalid. Name may only contain lowercase letters, numbers, '_', and '-'")]
    InvalidName { name: String },

    #[error("Plugin named {name} already added")]
    AlreadyExists { name: String },

    #[error("no such plugin: {name}")]
    NotFound { name: String },

    #[error("unable to clone plugin: repository not found ({url})")]
    CloneFailed {
        url: String,
        #[source]
        source: git2::Error,
    },

    #[error("unable to open plugin Git repository: {source}")]
    GitRepository {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Plugin named {plugin} does not have a callback named {callback}")]
    NoCallback { plugin: String, callback: String },

    #[error("callback {callback} of plugin {plugin} failed: {source}")]
    CallbackExecution {
        plugin: String,
        callback: String,
        #[source]
        source: CallbackFailure,
    },

    #[error("failed to write callback output: {0}")]
    Sink(#[source] std::io::Error),

    #[error("plugin {name} updated to {new_ref}, but post-plugin-update failed: {source}")]
    PostUpdateCallback {
        name: String,
        new_ref: String,
        #[source]
        source: Box<Error>,
    },

    #[error(transparent)]
    Fs(#[from] asdf_fs::Error),
}

impl Error {
    /// Whether this error only signals that an optional callback is absent.
    pub fn is_no_callback(&self) -> bool {
        matches!(self, Self::NoCallback { .. })
    }
}

/// Why a callback script that exists did not succeed
#[derive(Debug, thiserror::Error)]
pub enum CallbackFailure {
    #[error("unable to launch script: {0}")]
    Launch(#[source] std::io::Error),

    #[error("script exited with {0}")]
    Exit(ExitStatus),
}
