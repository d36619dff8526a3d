//! # Error Types
//!
//! The rejection taxonomy used across subsystems.

use thiserror::Error;

/// Terminal outcome classes for a rejected request.
///
/// None of these are retried inside the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Admission denied, client should back off.
    RateLimited,
    /// Input could not be decoded or sizes/encodings are invalid.
    BadFormat,
    /// Well-formed input whose signature does not verify.
    Unauthorized,
    /// Persistence collaborator failed.
    StorageFailure,
}

impl ErrorKind {
    /// Stable label used for logs and metric labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::RateLimited => "rate_limited",
            ErrorKind::BadFormat => "bad_format",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::StorageFailure => "storage_failure",
        }
    }
}

/// Errors surfaced by the ingestion entry point and read paths.
///
/// Messages are client-safe: storage details never appear here.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IngestError {
    /// Admission gate denied the request.
    #[error("Rate limit exceeded")]
    RateLimited {
        /// Time until the gate would admit again, in milliseconds.
        retry_after_ms: u64,
    },

    /// Malformed encoding or invalid field sizes.
    #[error("{0}")]
    BadFormat(String),

    /// Signature did not verify.
    #[error("Unauthorized")]
    Unauthorized,

    /// Storage failed; the cause is logged, not returned.
    #[error("Internal server error")]
    StorageFailure,
}

impl IngestError {
    /// The error kind, the single mapping point for status codes.
    pub fn kind(&self) -> ErrorKind {
        match self {
            IngestError::RateLimited { .. } => ErrorKind::RateLimited,
            IngestError::BadFormat(_) => ErrorKind::BadFormat,
            IngestError::Unauthorized => ErrorKind::Unauthorized,
            IngestError::StorageFailure => ErrorKind::StorageFailure,
        }
    }

    pub fn bad_format(msg: impl Into<String>) -> Self {
        IngestError::BadFormat(msg.into())
    }
}
