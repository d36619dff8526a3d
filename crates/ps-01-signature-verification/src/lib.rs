//! # Signature Verification Subsystem (PS-01)
//!
//! Turns a `CandidateUpdate` into a `VerifiedUpdate` or a typed rejection.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Sanitizer, signed-message layout, Ed25519
//!   verification. Pure, no I/O
//! - **Ports Layer** (`ports/`): The inbound API trait
//! - **Service Layer** (`service.rs`): Wires domain logic to ports and records
//!   metrics
//!
//! ## Validation order
//!
//! First failing check wins:
//! 1. Body non-empty and at most 256 bytes after sanitization
//! 2. Link, if present, at most 256 bytes after sanitization
//! 3. Public key exactly 32 bytes, signature exactly 64 bytes
//! 4. Ed25519 signature over `pubkey || body || link`
//!
//! Steps 1 to 3 are format rejections; step 4 is an authorization rejection.

pub mod domain;
pub mod ports;
pub mod service;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

// Re-export public API
pub use domain::errors::VerificationError;
pub use domain::message::signed_message;
pub use domain::sanitize::sanitize;
pub use domain::verifier::{verify_signature, verify_update};
pub use ports::inbound::SignatureVerificationApi;
pub use service::SignatureVerificationService;
