//! # Ledger
//!
//! The single owned aggregate state: store handle, request counters,
//! per-key post counts and the last assigned timestamp. Every mutation and
//! every read that must agree with them happens under one mutex, so a
//! reader never sees a counter without its record or the other way round.
//!
//! Lock hold time for `admit` is one append plus O(1) bookkeeping.

use parking_lot::Mutex;
use ps_02_update_storage::{StoreError, UpdateStore};
use ps_03_statistics::{LedgerReader, LedgerView, PostCounts};
use shared_types::{PublicKey, RequestCounters, StatusUpdate, VerifiedUpdate};
use std::sync::Arc;
use tracing::info;

use crate::ports::outbound::TimeSource;

#[derive(Default)]
struct LedgerState {
    counters: RequestCounters,
    post_counts: PostCounts,
    last_timestamp: u64,
}

pub struct Ledger {
    state: Mutex<LedgerState>,
    store: Arc<dyn UpdateStore>,
    clock: Arc<dyn TimeSource>,
}

impl Ledger {
    /// Open the ledger over `store`, rebuilding per-key counts and the last
    /// timestamp from what is already stored. Request counters start at
    /// zero: they describe this process only.
    pub fn open(store: Arc<dyn UpdateStore>, clock: Arc<dyn TimeSource>) -> Result<Self, StoreError> {
        let existing = store.all_updates()?;
        let state = LedgerState {
            counters: RequestCounters::default(),
            post_counts: existing.iter().map(|u| u.pubkey).collect(),
            last_timestamp: existing.iter().map(|u| u.timestamp).max().unwrap_or(0),
        };
        if !existing.is_empty() {
            info!(
                updates = existing.len(),
                unique_pubkeys = state.post_counts.len(),
                "Ledger rebuilt from store"
            );
        }

        Ok(Self {
            state: Mutex::new(state),
            store,
            clock,
        })
    }

    /// Persist a verified update and fold it into the counters.
    ///
    /// Timestamp read, append and counter increments happen under the
    /// lock, so ids and timestamps are assigned in the same order. On a
    /// storage failure only `failed` moves.
    pub fn admit(&self, update: VerifiedUpdate) -> Result<StatusUpdate, StoreError> {
        let mut state = self.state.lock();
        let timestamp = self.clock.now_nanos().max(state.last_timestamp);

        match self.store.append(update, timestamp) {
            Ok(stored) => {
                state.last_timestamp = timestamp;
                state.counters.successful += 1;
                state.post_counts.record(stored.pubkey);
                Ok(stored)
            }
            Err(e) => {
                state.counters.failed += 1;
                Err(e)
            }
        }
    }

    /// Count one rejected request.
    pub fn record_rejection(&self) {
        self.state.lock().counters.failed += 1;
    }

    pub fn counters(&self) -> RequestCounters {
        self.state.lock().counters
    }

    /// Accepted posts for `pubkey`.
    pub fn post_count(&self, pubkey: &PublicKey) -> u64 {
        self.state.lock().post_counts.get(pubkey)
    }

    /// Distinct keys with at least one accepted post.
    pub fn unique_keys(&self) -> usize {
        self.state.lock().post_counts.len()
    }

    /// Updates for one key, ascending by id.
    pub fn updates_by_key(&self, pubkey: &PublicKey) -> Result<Vec<StatusUpdate>, StoreError> {
        let _state = self.state.lock();
        self.store.updates_by_key(pubkey)
    }

    /// All updates, ascending by id.
    pub fn all_updates(&self) -> Result<Vec<StatusUpdate>, StoreError> {
        let _state = self.state.lock();
        self.store.all_updates()
    }
}

impl LedgerReader for Ledger {
    fn consistent_view(&self) -> Result<LedgerView, StoreError> {
        let state = self.state.lock();
        Ok(LedgerView {
            updates: self.store.all_updates()?,
            counters: state.counters,
        })
    }
}
