//! Unified error types for Longan.
//!
//! This module provides the crate-wide error type covering document
//! validation, layout, serialization, local download and persistence.
use thiserror::Error;

/// Main error type for Longan operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is unusable as given (for example, it has no title).
    ///
    /// Export treats this as a warning and proceeds with fallbacks; it is
    /// surfaced by [`crate::model::Document::validate`].
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Requested export format is not one of `pdf` or `docx`
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Page geometry cannot hold even a single line of text
    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(String),

    /// A serializer failed while producing output bytes
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// The local save-as step failed
    #[error("Download failed: {0}")]
    Download(String),

    /// The persistence gateway answered with a non-success status
    #[error("Persistence failed with status {status}: {detail}")]
    PersistenceFailed { status: u16, detail: String },

    /// The persistence gateway rejected the credential (HTTP 401)
    #[error("Authentication expired: {detail}")]
    AuthExpired { detail: String },

    /// The request never produced a response (connection, timeout, body)
    #[error("Transport error: {0}")]
    Transport(String),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(String),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether the failure happened after the exported file was produced,
    /// i.e. while talking to the persistence gateway.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            Error::PersistenceFailed { .. } | Error::AuthExpired { .. } | Error::Transport(_)
        )
    }
}

/// Result type for Longan operations.
pub type Result<T> = std::result::Result<T, Error>;
