//! Error types for Trellis.
//!
//! Structural defects in a document set (dangling references, orphans,
//! cycles) are never errors: they are reported as data by the graph crate.
//! This type covers the conditions a caller cannot proceed past, such as an
//! unknown origin document, unreadable files, or a broken config file.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for Trellis operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur across the Trellis crates.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// I/O failure tied to a specific path.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Content could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A requested item does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// What kind of item was looked up (e.g. "document").
        kind: String,
        /// The identifier or path that failed to resolve.
        id: String,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Creates a not-found error.
    pub fn not_found(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Error::NotFound {
            kind: kind.into(),
            id: id.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Error::Parse(message.into())
    }

    /// Wraps an I/O error with the path that caused it.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Returns true if this error reports a missing item.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
