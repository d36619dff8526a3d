//! # Storage Errors

use thiserror::Error;

/// Errors raised by `UpdateStore` implementations.
///
/// Never shown to clients; the ingestion layer flattens them to a generic
/// internal error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Underlying engine I/O failed.
    #[error("I/O error: {message}")]
    Io { message: String },

    /// A stored record could not be encoded or decoded.
    #[error("Codec error: {message}")]
    Codec { message: String },

    /// The store refuses writes (e.g. injected failure, closed database).
    #[error("Store unavailable: {message}")]
    Unavailable { message: String },
}
