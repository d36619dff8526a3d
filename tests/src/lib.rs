//! # postshortly Test Suite
//!
//! Cross-subsystem flows that no single crate can cover on its own.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # In-process node with controllable clocks
//! └── integration/
//!     ├── ingestion_flows.rs   # Pipeline, concurrency, persistence
//!     ├── statistics_flows.rs  # Aggregates and periodic staleness
//!     └── http_flows.rs        # Routes end to end through the router
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ps-tests
//! cargo test -p ps-tests integration::http_flows
//!
//! # Benchmarks
//! cargo bench -p ps-tests
//! ```

pub mod fixtures;
pub mod integration;
