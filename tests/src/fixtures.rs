//! In-process node assembled from the real subsystems.
//!
//! The admission gate runs on a `FakeRelativeClock` and the ledger on a
//! `StepClock`, so rate limiting and timestamps are deterministic.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::Router;
use governor::clock::FakeRelativeClock;
use ps_02_update_storage::{InMemoryUpdateStore, UpdateStore};
use ps_03_statistics::{SnapshotLimits, StatisticsMode, StatisticsService};
use ps_04_ingestion::{AdmissionConfig, AdmissionGate, IngestionService, Ledger, TimeSource};
use ps_05_api_gateway::{build_router, AppState, GatewayConfig};
use ps_01_signature_verification::SignatureVerificationService;

/// Ledger clock advancing by `step` nanoseconds on every read.
pub struct StepClock {
    now: AtomicU64,
    step: u64,
}

impl StepClock {
    pub fn new(step: u64) -> Self {
        Self {
            now: AtomicU64::new(0),
            step,
        }
    }
}

impl TimeSource for StepClock {
    fn now_nanos(&self) -> u64 {
        self.now.fetch_add(self.step, Ordering::SeqCst) + self.step
    }
}

pub struct TestNode {
    pub gate_clock: FakeRelativeClock,
    pub store: Arc<dyn UpdateStore>,
    pub ledger: Arc<Ledger>,
    pub ingestion: Arc<IngestionService>,
    pub statistics: Arc<StatisticsService>,
}

impl TestNode {
    /// In-memory node with the given admission ceiling.
    pub fn new(requests_per_second: u32, mode: StatisticsMode) -> Self {
        Self::with_store(Arc::new(InMemoryUpdateStore::new()), requests_per_second, mode)
    }

    /// Node with a gate wide enough that admission never interferes.
    pub fn permissive(mode: StatisticsMode) -> Self {
        Self::new(100_000, mode)
    }

    pub fn with_store(
        store: Arc<dyn UpdateStore>,
        requests_per_second: u32,
        mode: StatisticsMode,
    ) -> Self {
        let gate_clock = FakeRelativeClock::default();
        let config = AdmissionConfig {
            requests_per_second,
            burst_size: requests_per_second,
        };
        let gate = AdmissionGate::with_clock(&config, gate_clock.clone())
            .expect("valid admission config");
        let ledger = Arc::new(
            Ledger::open(store.clone(), Arc::new(StepClock::new(1_000))).expect("ledger opens"),
        );
        let ingestion = Arc::new(IngestionService::new(
            Arc::new(gate),
            Arc::new(SignatureVerificationService::new()),
            ledger.clone(),
        ));
        let statistics = Arc::new(StatisticsService::new(
            ledger.clone(),
            store.clone(),
            SnapshotLimits::with_rate_limit(requests_per_second),
            mode,
        ));

        Self {
            gate_clock,
            store,
            ledger,
            ingestion,
            statistics,
        }
    }

    /// Router over this node with default gateway settings.
    pub fn router(&self) -> Router {
        build_router(
            AppState {
                ingestion: self.ingestion.clone(),
                statistics: self.statistics.clone(),
            },
            &GatewayConfig::default(),
        )
    }
}
