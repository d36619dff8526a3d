//! # In-Memory Update Store
//!
//! Used by unit tests, integration tests and nodes started with
//! `PS_STORAGE=memory`. Nothing survives a restart.

use parking_lot::RwLock;
use ps_telemetry::UPDATES_STORED;
use shared_types::{PublicKey, StatisticsSnapshot, StatusUpdate, TimestampNanos, VerifiedUpdate};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::errors::StoreError;
use crate::ports::outbound::UpdateStore;

#[derive(Default)]
struct MemoryState {
    /// Index i holds id i + 1.
    updates: Vec<StatusUpdate>,
    by_key: HashMap<PublicKey, Vec<usize>>,
    snapshot: Option<StatisticsSnapshot>,
}

/// `UpdateStore` backed by a vector and a per-key index.
#[derive(Default)]
pub struct InMemoryUpdateStore {
    state: RwLock<MemoryState>,
    fail_writes: AtomicBool,
}

impl InMemoryUpdateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with `StoreError::Unavailable`.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable {
                message: "writes disabled".to_string(),
            });
        }
        Ok(())
    }
}

impl UpdateStore for InMemoryUpdateStore {
    fn append(
        &self,
        update: VerifiedUpdate,
        timestamp: TimestampNanos,
    ) -> Result<StatusUpdate, StoreError> {
        self.check_writable()?;

        let mut state = self.state.write();
        let index = state.updates.len();
        let stored = StatusUpdate::from_verified(update, index as u64 + 1, timestamp);

        state.by_key.entry(stored.pubkey).or_default().push(index);
        state.updates.push(stored.clone());
        UPDATES_STORED.set(state.updates.len() as f64);

        Ok(stored)
    }

    fn updates_by_key(&self, pubkey: &PublicKey) -> Result<Vec<StatusUpdate>, StoreError> {
        let state = self.state.read();
        Ok(state
            .by_key
            .get(pubkey)
            .map(|indices| indices.iter().map(|&i| state.updates[i].clone()).collect())
            .unwrap_or_default())
    }

    fn all_updates(&self) -> Result<Vec<StatusUpdate>, StoreError> {
        Ok(self.state.read().updates.clone())
    }

    fn save_snapshot(&self, snapshot: &StatisticsSnapshot) -> Result<(), StoreError> {
        self.check_writable()?;
        self.state.write().snapshot = Some(snapshot.clone());
        Ok(())
    }

    fn latest_snapshot(&self) -> Result<Option<StatisticsSnapshot>, StoreError> {
        Ok(self.state.read().snapshot.clone())
    }

    fn len(&self) -> Result<u64, StoreError> {
        Ok(self.state.read().updates.len() as u64)
    }
}
