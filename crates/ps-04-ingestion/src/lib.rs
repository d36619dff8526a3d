//! # Ingestion Subsystem (PS-04)
//!
//! The single entry point that turns a raw submission into a stored update
//! or a rejection, plus the read paths over the same state.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Admission gate, wire decoding,
//!   configuration
//! - **Ledger** (`ledger.rs`): The single owned aggregate state behind one
//!   exclusive lock
//! - **Ports Layer** (`ports/`): `AdmissionControl` and `TimeSource`
//! - **Adapters** (`adapters/`): `SystemTimeSource`
//! - **Service Layer** (`service.rs`): The `Admitted` / `Rejected` pipeline
//!
//! ## Pipeline
//!
//! ```text
//! raw bytes -> admission -> decode -> verify -> ledger.admit -> Admitted
//!                  |           |         |           |
//!                  +-----------+---------+-----------+--> Rejected(kind)
//! ```
//!
//! Every rejection increments the failed counter exactly once.

pub mod adapters;
pub mod domain;
pub mod ledger;
pub mod ports;
pub mod service;

pub use adapters::time::SystemTimeSource;
pub use domain::admission::AdmissionGate;
pub use domain::config::{AdmissionConfig, ConfigError};
pub use domain::wire::decode_candidate;
pub use ledger::Ledger;
pub use ports::outbound::{AdmissionControl, TimeSource};
pub use service::IngestionService;
