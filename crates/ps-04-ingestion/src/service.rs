//! # Ingestion Service
//!
//! Per-request state machine with two terminal states:
//!
//! 1. Admission gate: deny -> `Rejected(RateLimited)`
//! 2. Decode: malformed -> `Rejected(BadFormat)`
//! 3. Verify: failure -> `Rejected(BadFormat | Unauthorized)`
//! 4. Ledger admit: storage error -> `Rejected(StorageFailure)`, else `Admitted`
//!
//! No step suspends; a request runs to a terminal state in one call.

use ps_01_signature_verification::SignatureVerificationApi;
use ps_telemetry::{UPDATES_ACCEPTED, UPDATES_REJECTED};
use shared_types::{IngestError, PublicKey, StatusUpdate};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::wire::decode_candidate;
use crate::ledger::Ledger;
use crate::ports::outbound::AdmissionControl;

const INVALID_PUBLIC_KEY: &str = "Invalid public key";

pub struct IngestionService {
    gate: Arc<dyn AdmissionControl>,
    verifier: Arc<dyn SignatureVerificationApi>,
    ledger: Arc<Ledger>,
}

impl IngestionService {
    pub fn new(
        gate: Arc<dyn AdmissionControl>,
        verifier: Arc<dyn SignatureVerificationApi>,
        ledger: Arc<Ledger>,
    ) -> Self {
        Self {
            gate,
            verifier,
            ledger,
        }
    }

    /// Run one raw submission through the pipeline.
    pub fn submit(&self, raw: &[u8]) -> Result<StatusUpdate, IngestError> {
        let result = self.run_pipeline(raw);
        match &result {
            Ok(stored) => {
                UPDATES_ACCEPTED.inc();
                info!(
                    id = stored.id,
                    pubkey = %stored.pubkey,
                    posts_for_key = self.ledger.post_count(&stored.pubkey),
                    "Status update accepted"
                );
            }
            Err(e) => self.note_rejection(e),
        }
        result
    }

    fn run_pipeline(&self, raw: &[u8]) -> Result<StatusUpdate, IngestError> {
        if let Err(wait) = self.gate.try_acquire() {
            self.ledger.record_rejection();
            return Err(IngestError::RateLimited {
                retry_after_ms: wait.as_millis() as u64,
            });
        }

        let candidate = decode_candidate(raw).map_err(|e| {
            self.ledger.record_rejection();
            e
        })?;

        let verified = self.verifier.verify_update(candidate).map_err(|e| {
            self.ledger.record_rejection();
            IngestError::from(e)
        })?;

        // The ledger counts its own storage failures.
        self.ledger.admit(verified).map_err(|e| {
            error!(error = %e, "Failed to persist status update");
            IngestError::StorageFailure
        })
    }

    fn note_rejection(&self, e: &IngestError) {
        let reason = e.kind().as_str();
        UPDATES_REJECTED.with_label_values(&[reason]).inc();
        warn!(reason, error = %e, "Request rejected");
    }

    /// Count a request whose input never reached the pipeline, such as an
    /// oversized body or an undecodable path, and return its format error.
    pub fn reject_malformed(&self, message: &str) -> IngestError {
        self.ledger.record_rejection();
        let err = IngestError::bad_format(message);
        self.note_rejection(&err);
        err
    }

    /// Updates for a hex-encoded key, newest first.
    ///
    /// Anything other than exactly 32 hex-decoded bytes is a format
    /// rejection and counts as a failed request.
    pub fn updates_by_key(&self, pubkey_hex: &str) -> Result<Vec<StatusUpdate>, IngestError> {
        let Some(pubkey) = PublicKey::from_hex(pubkey_hex) else {
            return Err(self.reject_malformed(INVALID_PUBLIC_KEY));
        };

        let mut updates = self.ledger.updates_by_key(&pubkey).map_err(|e| {
            error!(error = %e, "Failed to read updates by key");
            IngestError::StorageFailure
        })?;
        updates.reverse();
        Ok(updates)
    }

    /// All updates, newest first.
    pub fn all_updates(&self) -> Result<Vec<StatusUpdate>, IngestError> {
        let mut updates = self.ledger.all_updates().map_err(|e| {
            error!(error = %e, "Failed to read updates");
            IngestError::StorageFailure
        })?;
        updates.reverse();
        Ok(updates)
    }

    /// Configured admission ceiling.
    pub fn admission_ceiling(&self) -> u32 {
        self.gate.ceiling()
    }

    pub fn ledger(&self) -> &Arc<Ledger> {
        &self.ledger
    }
}
