//! # Domain Layer
//!
//! Pure validation logic with no I/O.

pub mod errors;
pub mod message;
pub mod sanitize;
pub mod verifier;
