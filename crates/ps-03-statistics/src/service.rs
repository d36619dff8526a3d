//! # Statistics Service
//!
//! Implements `StatisticsApi` for both read modes.

use ps_02_update_storage::UpdateStore;
use ps_telemetry::STATISTICS_RECOMPUTE_DURATION;
use shared_types::StatisticsSnapshot;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::domain::aggregator::{aggregate, SnapshotLimits};
use crate::domain::errors::StatisticsError;
use crate::ports::inbound::StatisticsApi;
use crate::ports::outbound::LedgerReader;

/// How reads are served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatisticsMode {
    Synchronous,
    Periodic { interval: Duration },
}

pub struct StatisticsService {
    ledger: Arc<dyn LedgerReader>,
    store: Arc<dyn UpdateStore>,
    limits: SnapshotLimits,
    mode: StatisticsMode,
}

impl StatisticsService {
    pub fn new(
        ledger: Arc<dyn LedgerReader>,
        store: Arc<dyn UpdateStore>,
        limits: SnapshotLimits,
        mode: StatisticsMode,
    ) -> Self {
        Self {
            ledger,
            store,
            limits,
            mode,
        }
    }

    pub fn mode(&self) -> StatisticsMode {
        self.mode
    }

    /// Aggregate a fresh snapshot from the ledger.
    pub fn compute(&self) -> Result<StatisticsSnapshot, StatisticsError> {
        let _timer = ps_telemetry::time_histogram!(STATISTICS_RECOMPUTE_DURATION);
        let view = self.ledger.consistent_view()?;
        Ok(aggregate(&view.updates, view.counters, &self.limits))
    }

    /// Compute a snapshot and persist it as the latest, in one write.
    pub fn refresh(&self) -> Result<StatisticsSnapshot, StatisticsError> {
        let snapshot = self.compute()?;
        self.store.save_snapshot(&snapshot)?;
        Ok(snapshot)
    }
}

impl StatisticsApi for StatisticsService {
    fn snapshot(&self) -> Result<StatisticsSnapshot, StatisticsError> {
        match self.mode {
            StatisticsMode::Synchronous => self.compute(),
            StatisticsMode::Periodic { .. } => match self.store.latest_snapshot()? {
                Some(snapshot) => Ok(snapshot),
                None => {
                    debug!("No persisted snapshot yet, computing one");
                    self.refresh()
                }
            },
        }
    }
}
