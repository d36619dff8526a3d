use ps_02_update_storage::StoreError;
use thiserror::Error;

/// Errors raised while producing a snapshot.
#[derive(Debug, Clone, Error)]
pub enum StatisticsError {
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}
