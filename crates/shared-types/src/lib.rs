//! # Shared Types Crate
//!
//! Domain entities and error kinds shared by all postshortly subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: cross-subsystem types are defined here.
//! - **Typed lifecycle**: an update moves `CandidateUpdate` ->
//!   `VerifiedUpdate` -> `StatusUpdate`; only the verifier produces the
//!   second and only the store produces the third.
//! - **One error taxonomy**: every rejection maps to exactly one `ErrorKind`.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
