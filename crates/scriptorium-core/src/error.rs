//! Error types for scriptorium.

use thiserror::Error;

/// Result type alias using scriptorium's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for scriptorium operations.
///
/// Consumers embedding this core behind a transport map variants to their
/// own status space: `Unauthorized` → 401, `Forbidden` → 403,
/// `DocumentNotFound`/`AccountNotFound`/`NotFound` → 404,
/// `InvalidInput` → 400, everything else → 500.
///
/// Enrichment degradation is deliberately absent from this taxonomy: a
/// failed summarize/tag/embed call yields empty fields and a warning log,
/// never an error surfaced to the caller.
#[derive(Error, Debug)]
pub enum Error {
    /// No, invalid, or expired credential
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not owner/admin of the target resource
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Document not found
    #[error("Document not found: {0}")]
    DocumentNotFound(uuid::Uuid),

    /// Account not found
    #[error("Account not found: {0}")]
    AccountNotFound(uuid::Uuid),

    /// Generic resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed input fields
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Storage engine operation failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Embedding generation failed
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Inference/generation failed
    #[error("Inference error: {0}")]
    Inference(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
