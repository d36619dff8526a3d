//! # Update Storage Subsystem (PS-02)
//!
//! The storage collaborator: an append-only collection of `StatusUpdate`s
//! with point lookups by key, plus a slot for the latest statistics snapshot.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Error types
//! - **Ports Layer** (`ports/`): `UpdateStore`, the only contract the rest of
//!   the node relies on
//! - **Adapters** (`adapters/`): `InMemoryUpdateStore` for tests and ephemeral
//!   nodes, `RocksDbUpdateStore` (feature `rocksdb`) for production
//!
//! ## Ordering
//!
//! Ids are assigned by the store as previous max + 1, starting at 1. All
//! list operations return updates ascending by id.

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::memory::InMemoryUpdateStore;
#[cfg(feature = "rocksdb")]
pub use adapters::rocksdb_adapter::{RocksDbConfig, RocksDbUpdateStore};
pub use domain::errors::StoreError;
pub use ports::outbound::UpdateStore;
