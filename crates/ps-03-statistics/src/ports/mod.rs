//! # Ports Layer
//!
//! - **Inbound** (`inbound.rs`): `StatisticsApi`
//! - **Outbound** (`outbound.rs`): `LedgerReader`

pub mod inbound;
pub mod outbound;
