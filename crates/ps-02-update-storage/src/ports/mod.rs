//! # Ports Layer
//!
//! - **Outbound** (`outbound.rs`): The storage contract the node depends on

pub mod outbound;
