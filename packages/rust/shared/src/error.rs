//! Error types for scenport.
//!
//! Library crates use [`ScenportError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all scenport operations.
#[derive(Debug, thiserror::Error)]
pub enum ScenportError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// The export file could not be read as a scenario export envelope.
    /// The underlying cause is logged, not surfaced to the user.
    #[error("not a valid scenario export file: {message}")]
    InvalidFile { message: String },

    /// Data validation error (schema mismatch, invalid format, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// A step's parent chain loops back onto itself.
    #[error("cycle detected in step parent links at step {step_id}")]
    Cycle { step_id: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ScenportError>;

impl ScenportError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create an invalid-file error from any displayable message.
    pub fn invalid_file(msg: impl Into<String>) -> Self {
        Self::InvalidFile {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Create a cycle error for the step whose id repeated on the path.
    pub fn cycle(step_id: impl Into<String>) -> Self {
        Self::Cycle {
            step_id: step_id.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
