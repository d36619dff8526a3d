//! # Update Verifier
//!
//! Ed25519 verification is a pure function of (key, message, signature):
//! no nonce, no state, never panics on correctly sized garbage.

use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use shared_types::{
    CandidateUpdate, PublicKey, SignatureBytes, VerifiedUpdate, BODY_MAX_SIZE, LINK_MAX_SIZE,
};

use super::errors::VerificationError;
use super::message::signed_message;
use super::sanitize::sanitize;

/// Validate one candidate, first failing check wins.
///
/// The returned update carries the sanitized body and link, which are also
/// the bytes the signature must cover.
pub fn verify_update(candidate: CandidateUpdate) -> Result<VerifiedUpdate, VerificationError> {
    let body = sanitize(&candidate.body);
    if body.is_empty() {
        return Err(VerificationError::EmptyBody);
    }
    if body.len() > BODY_MAX_SIZE {
        return Err(VerificationError::BodyTooLarge { len: body.len() });
    }

    let link = candidate
        .link
        .map(|link| sanitize(&link))
        .filter(|link| !link.is_empty());
    if let Some(link) = &link {
        if link.len() > LINK_MAX_SIZE {
            return Err(VerificationError::LinkTooLarge { len: link.len() });
        }
    }

    let pubkey = PublicKey::from_slice(&candidate.pubkey).ok_or(
        VerificationError::InvalidPublicKeyLength {
            len: candidate.pubkey.len(),
        },
    )?;
    let signature = SignatureBytes::from_slice(&candidate.signature).ok_or(
        VerificationError::InvalidSignatureLength {
            len: candidate.signature.len(),
        },
    )?;

    let message = signed_message(&pubkey, &body, link.as_deref());
    verify_signature(&pubkey, &message, &signature)?;

    Ok(VerifiedUpdate {
        body,
        link,
        pubkey,
        signature,
    })
}

/// Verify an Ed25519 signature over `message`.
///
/// A key that does not decode to a curve point is a mismatch, not a format
/// error: its length was already valid.
pub fn verify_signature(
    pubkey: &PublicKey,
    message: &[u8],
    signature: &SignatureBytes,
) -> Result<(), VerificationError> {
    let key = VerifyingKey::from_bytes(pubkey.as_bytes())
        .map_err(|_| VerificationError::SignatureMismatch)?;
    let sig = Signature::from_bytes(signature.as_bytes());

    key.verify(message, &sig)
        .map_err(|_| VerificationError::SignatureMismatch)
}
