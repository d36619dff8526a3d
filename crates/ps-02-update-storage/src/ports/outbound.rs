//! # Outbound Ports (Driven Ports)
//!
//! The storage contract required by ingestion and statistics.

use shared_types::{PublicKey, StatisticsSnapshot, StatusUpdate, TimestampNanos, VerifiedUpdate};

use crate::domain::errors::StoreError;

/// Append-only status update store.
///
/// Production: `RocksDbUpdateStore` (feature `rocksdb`)
/// Testing: `InMemoryUpdateStore`
///
/// Callers serialize `append` through the ledger lock; implementations must
/// still be safe to share across threads.
pub trait UpdateStore: Send + Sync {
    /// Persist one update, assigning the next id (previous max + 1, first is 1).
    ///
    /// Either the record and its key index are both written or nothing is.
    fn append(
        &self,
        update: VerifiedUpdate,
        timestamp: TimestampNanos,
    ) -> Result<StatusUpdate, StoreError>;

    /// All updates for one key, ascending by id.
    fn updates_by_key(&self, pubkey: &PublicKey) -> Result<Vec<StatusUpdate>, StoreError>;

    /// All updates, ascending by id.
    fn all_updates(&self) -> Result<Vec<StatusUpdate>, StoreError>;

    /// Replace the persisted statistics snapshot in one write.
    fn save_snapshot(&self, snapshot: &StatisticsSnapshot) -> Result<(), StoreError>;

    /// The last persisted statistics snapshot, if any.
    fn latest_snapshot(&self) -> Result<Option<StatisticsSnapshot>, StoreError>;

    /// Number of stored updates.
    fn len(&self) -> Result<u64, StoreError>;

    fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}
