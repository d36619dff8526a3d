//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of this subsystem.

use shared_types::{CandidateUpdate, PublicKey, SignatureBytes, VerifiedUpdate};

use crate::domain::errors::VerificationError;

/// Primary Signature Verification API.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait SignatureVerificationApi: Send + Sync {
    /// Sanitize, size-check and verify one candidate update.
    fn verify_update(&self, candidate: CandidateUpdate) -> Result<VerifiedUpdate, VerificationError>;

    /// Verify a raw signature over arbitrary bytes.
    fn verify_signature(
        &self,
        pubkey: &PublicKey,
        message: &[u8],
        signature: &SignatureBytes,
    ) -> bool;
}
