//! Error types for manifest-patch.
//!
//! Fatal errors abort a patch run and are returned as `Result<T>`, which
//! aliases `Result<T, PatchError>`. Per-file failures never abort a run;
//! they are collected as [`FileError`] values inside a `PatchResult`.

use thiserror::Error;

/// Errors that abort a patch run before any file is touched.
#[derive(Debug, Error)]
pub enum PatchError {
    /// Release version is empty or not a semantic version.
    #[error("Invalid release version '{0}': {1}")]
    InvalidVersion(String, String),

    /// Target rule is unusable (e.g. empty field name).
    #[error("Invalid target rule '{0}': {1}")]
    InvalidRule(String, String),

    /// Target rule glob failed to compile.
    #[error("Invalid target pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: ignore::Error,
    },

    /// File system operation failed outside of per-file processing.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Regex compilation failed (indicates bug).
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Unexpected error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Failure recorded against a single matched file.
///
/// Non-fatal: the remaining files of the batch are still processed.
#[derive(Debug, Error)]
pub enum FileError {
    /// File is missing, unreadable, or not valid UTF-8.
    #[error("read failed: {source}")]
    Read {
        #[source]
        source: std::io::Error,
    },

    /// New content could not be persisted. The original file is untouched.
    #[error("write failed: {source}")]
    Write {
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for manifest-patch operations.
pub type Result<T> = std::result::Result<T, PatchError>;
