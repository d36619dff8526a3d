//! Keypair generation and candidate signing for tests.

use ed25519_dalek::{Signer, SigningKey};
use rand::rngs::OsRng;
use shared_types::{CandidateUpdate, PublicKey, SignatureBytes};

use crate::domain::message::signed_message;
use crate::domain::sanitize::sanitize;

/// An Ed25519 signing key with conveniences for building submissions.
pub struct TestKeypair {
    signing: SigningKey,
}

impl TestKeypair {
    pub fn generate() -> Self {
        Self {
            signing: SigningKey::generate(&mut OsRng),
        }
    }

    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            signing: SigningKey::from_bytes(&seed),
        }
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.signing.verifying_key().to_bytes())
    }

    pub fn sign(&self, message: &[u8]) -> SignatureBytes {
        SignatureBytes(self.signing.sign(message).to_bytes())
    }
}

/// Build a candidate whose signature covers the sanitized body and link,
/// as a well-behaved client would.
pub fn signed_candidate(keys: &TestKeypair, body: &str, link: Option<&str>) -> CandidateUpdate {
    let pubkey = keys.public_key();
    let clean_body = sanitize(body);
    let clean_link = link.map(sanitize).filter(|l| !l.is_empty());
    let signature = keys.sign(&signed_message(&pubkey, &clean_body, clean_link.as_deref()));

    CandidateUpdate {
        body: body.to_string(),
        link: link.map(str::to_string),
        pubkey: pubkey.as_bytes().to_vec(),
        signature: signature.as_bytes().to_vec(),
    }
}

/// JSON request body for a signed submission, as sent over HTTP.
pub fn signed_request_json(keys: &TestKeypair, body: &str, link: Option<&str>) -> String {
    let candidate = signed_candidate(keys, body, link);
    let mut value = serde_json::json!({
        "body": candidate.body,
        "pubkey": hex::encode(&candidate.pubkey),
        "signature": hex::encode(&candidate.signature),
    });
    if let Some(link) = candidate.link {
        value["link"] = serde_json::Value::String(link);
    }
    value.to_string()
}
