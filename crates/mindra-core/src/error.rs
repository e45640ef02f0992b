//! Error types for Mindra.

use std::path::{Path, PathBuf};

/// Result type alias for Mindra operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur across the Mindra crates.
///
/// Stored-document corruption is deliberately absent: the store recovers
/// from it locally and never hands it to callers.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Input failed validation; nothing was mutated.
    #[error("Validation error: {message}")]
    Validation {
        /// Field or aspect that failed validation
        field: Option<String>,
        /// What went wrong
        message: String,
    },

    /// The caller lacks the capability required for the action.
    #[error("Permission denied: {action} requires {requirement}")]
    Permission {
        /// The attempted action
        action: String,
        /// What the caller was missing
        requirement: String,
    },

    /// A referenced entity does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Entity kind ("course", "module", ...)
        kind: &'static str,
        /// The id that was looked up
        id: String,
    },

    /// An operation is not valid in the current state.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// I/O error without path context.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error on a specific path.
    #[error("I/O error at {}: {source}", path.display())]
    IoPath {
        /// Path being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },
}

impl Error {
    /// Creates a new validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a new validation error with a field name.
    pub fn validation_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Creates a new permission error.
    pub fn permission<A, R>(action: A, requirement: R) -> Self
    where
        A: Into<String>,
        R: Into<String>,
    {
        Error::Permission {
            action: action.into(),
            requirement: requirement.into(),
        }
    }

    /// Creates a new not-found error.
    pub fn not_found<S: Into<String>>(kind: &'static str, id: S) -> Self {
        Error::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Creates a new invalid-state error.
    pub fn invalid_state<S: Into<String>>(message: S) -> Self {
        Error::InvalidState(message.into())
    }

    /// Wraps an I/O error with the path it occurred on.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::IoPath {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Whether the error should be shown inline to the person who triggered it,
    /// as opposed to an environment failure (disk, serialization, config).
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::Validation { .. }
                | Error::Permission { .. }
                | Error::NotFound { .. }
                | Error::InvalidState(_)
        )
    }
}
