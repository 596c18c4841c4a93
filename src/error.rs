//! Error taxonomy shared by the registry, ingestion and persistence layers.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by tracker operations.
///
/// None of these are retried internally; callers decide whether to report
/// and continue or to abort.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// A value fell outside its declared domain, or a required field was
    /// missing or malformed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// `add_student` was called with an identifier that is already stored.
    #[error("student '{0}' already exists")]
    DuplicateKey(String),

    /// A mutation targeted an identifier that was never added.
    #[error("student '{0}' not found")]
    NotFound(String),

    /// A file could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV source could not be decoded.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl TrackerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for tracker operations.
pub type Result<T> = std::result::Result<T, TrackerError>;
