//! # Ports Layer
//!
//! - **Inbound** (`inbound.rs`): The API this subsystem exposes

pub mod inbound;
