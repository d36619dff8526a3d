//! # Subsystem Container
//!
//! Builds every subsystem in dependency order:
//!
//! ```text
//! store -> ledger -> verifier -> ingestion -> statistics -> gateway state
//! ```

use std::sync::Arc;

use ps_01_signature_verification::SignatureVerificationService;
use ps_02_update_storage::{InMemoryUpdateStore, UpdateStore};
use ps_03_statistics::{SnapshotLimits, StatisticsService};
use ps_04_ingestion::{AdmissionGate, IngestionService, Ledger, SystemTimeSource};
use ps_05_api_gateway::AppState;
use tracing::info;

use crate::container::config::{ConfigError, NodeConfig, StorageBackend, StorageConfig};
use crate::RuntimeError;

/// Wired subsystem instances.
pub struct SubsystemContainer {
    pub store: Arc<dyn UpdateStore>,
    pub ledger: Arc<Ledger>,
    pub ingestion: Arc<IngestionService>,
    pub statistics: Arc<StatisticsService>,
}

impl SubsystemContainer {
    pub fn new(config: &NodeConfig) -> Result<Self, RuntimeError> {
        let store = open_store(&config.storage)?;
        info!(
            backend = ?config.storage.backend,
            stored_updates = store.len()?,
            "[ps-02] Update storage ready"
        );

        let ledger = Arc::new(Ledger::open(store.clone(), Arc::new(SystemTimeSource))?);

        let gate = AdmissionGate::new(&config.admission).map_err(ConfigError::from)?;
        info!(
            requests_per_second = config.admission.requests_per_second,
            burst_size = config.admission.burst_size,
            "[ps-04] Admission gate ready"
        );

        let ingestion = Arc::new(IngestionService::new(
            Arc::new(gate),
            Arc::new(SignatureVerificationService::new()),
            ledger.clone(),
        ));

        let statistics = Arc::new(StatisticsService::new(
            ledger.clone(),
            store.clone(),
            SnapshotLimits::with_rate_limit(config.admission.requests_per_second),
            config.statistics.mode(),
        ));
        info!(mode = ?statistics.mode(), "[ps-03] Statistics ready");

        Ok(Self {
            store,
            ledger,
            ingestion,
            statistics,
        })
    }

    /// Handler state for the gateway.
    pub fn app_state(&self) -> AppState {
        AppState {
            ingestion: self.ingestion.clone(),
            statistics: self.statistics.clone(),
        }
    }
}

fn open_store(config: &StorageConfig) -> Result<Arc<dyn UpdateStore>, RuntimeError> {
    match config.backend {
        StorageBackend::Memory => Ok(Arc::new(InMemoryUpdateStore::new())),
        StorageBackend::Rocksdb => open_rocksdb(config),
    }
}

#[cfg(feature = "rocksdb")]
fn open_rocksdb(config: &StorageConfig) -> Result<Arc<dyn UpdateStore>, RuntimeError> {
    use ps_02_update_storage::{RocksDbConfig, RocksDbUpdateStore, StoreError};

    if let Some(parent) = config.data_dir.parent() {
        std::fs::create_dir_all(parent).map_err(|e| StoreError::Io {
            message: format!("{}: {}", parent.display(), e),
        })?;
    }
    let store = RocksDbUpdateStore::open(RocksDbConfig {
        path: config.data_dir.to_string_lossy().into_owned(),
        ..RocksDbConfig::default()
    })?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "rocksdb"))]
fn open_rocksdb(_config: &StorageConfig) -> Result<Arc<dyn UpdateStore>, RuntimeError> {
    Err(ConfigError::BackendUnavailable("rocksdb").into())
}
