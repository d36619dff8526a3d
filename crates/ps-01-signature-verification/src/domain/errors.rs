//! # Verification Errors

use shared_types::{ErrorKind, IngestError};
use thiserror::Error;

/// Reasons a candidate update is rejected by the verifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("Body is empty")]
    EmptyBody,

    #[error("Body too large: {len} bytes")]
    BodyTooLarge { len: usize },

    #[error("Link too large: {len} bytes")]
    LinkTooLarge { len: usize },

    #[error("Invalid public key length: {len} bytes")]
    InvalidPublicKeyLength { len: usize },

    #[error("Invalid signature length: {len} bytes")]
    InvalidSignatureLength { len: usize },

    /// Well-formed input whose signature does not verify, including a key
    /// that is not a valid curve point.
    #[error("Signature verification failed")]
    SignatureMismatch,
}

impl VerificationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VerificationError::SignatureMismatch => ErrorKind::Unauthorized,
            _ => ErrorKind::BadFormat,
        }
    }
}

impl From<VerificationError> for IngestError {
    fn from(err: VerificationError) -> Self {
        match err.kind() {
            ErrorKind::Unauthorized => IngestError::Unauthorized,
            _ => IngestError::BadFormat("invalid field sizes".to_string()),
        }
    }
}
