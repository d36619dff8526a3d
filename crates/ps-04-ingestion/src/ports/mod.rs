//! # Ports Layer
//!
//! - **Outbound** (`outbound.rs`): Admission control and wall clock seams

pub mod outbound;
