//! # Signature Verification Service
//!
//! Application service layer that implements the `SignatureVerificationApi` trait.
//!
//! Delegates to the domain layer and records the outcome of every check in
//! `ps_signature_verifications_total`.

use ps_telemetry::SIGNATURE_VERIFICATIONS;
use shared_types::{CandidateUpdate, ErrorKind, PublicKey, SignatureBytes, VerifiedUpdate};
use tracing::debug;

use crate::domain::errors::VerificationError;
use crate::domain::verifier;
use crate::ports::inbound::SignatureVerificationApi;

/// Signature Verification Service.
///
/// Stateless; cheap to share behind an `Arc`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SignatureVerificationService;

impl SignatureVerificationService {
    pub fn new() -> Self {
        Self
    }
}

impl SignatureVerificationApi for SignatureVerificationService {
    fn verify_update(
        &self,
        candidate: CandidateUpdate,
    ) -> Result<VerifiedUpdate, VerificationError> {
        let result = verifier::verify_update(candidate);

        let outcome = match &result {
            Ok(_) => "valid",
            Err(e) if e.kind() == ErrorKind::Unauthorized => "mismatch",
            Err(_) => "bad_format",
        };
        SIGNATURE_VERIFICATIONS.with_label_values(&[outcome]).inc();

        if let Err(e) = &result {
            debug!(error = %e, "Candidate update rejected by verifier");
        }
        result
    }

    fn verify_signature(
        &self,
        pubkey: &PublicKey,
        message: &[u8],
        signature: &SignatureBytes,
    ) -> bool {
        verifier::verify_signature(pubkey, message, signature).is_ok()
    }
}
