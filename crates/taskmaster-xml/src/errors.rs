//! Error types for the XML bridge.

use taskmaster_store::StoreError;
use thiserror::Error;

/// Errors that can occur during XML export or import.
#[derive(Debug, Error)]
pub enum XmlError {
    /// The document is not well-formed XML. Reported before any write.
    #[error("invalid XML: {message}")]
    Parse {
        /// Parser diagnostic.
        message: String,
    },

    /// Writing the export document failed.
    #[error("xml write error: {message}")]
    Write {
        /// Writer diagnostic.
        message: String,
    },

    /// Underlying store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// `SQLite` failure during the import transaction.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl XmlError {
    /// Whether this error is a client-side document problem (as opposed to
    /// a storage failure).
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

/// Convenience type alias for bridge results.
pub type Result<T> = std::result::Result<T, XmlError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
