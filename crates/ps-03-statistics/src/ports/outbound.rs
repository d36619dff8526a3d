//! # Outbound Ports (Driven Ports)
//!
//! Dependencies required by the statistics service.

use ps_02_update_storage::StoreError;
use shared_types::{RequestCounters, StatusUpdate};

/// Updates and counters captured together.
#[derive(Debug, Clone, Default)]
pub struct LedgerView {
    /// Ascending by id.
    pub updates: Vec<StatusUpdate>,
    pub counters: RequestCounters,
}

/// Read access to the ledger's shared state.
///
/// Production: `Ledger` (ps-04-ingestion)
pub trait LedgerReader: Send + Sync {
    /// Take a view under the ledger's exclusive lock, so no counter is
    /// observed without its record or the other way round.
    fn consistent_view(&self) -> Result<LedgerView, StoreError>;
}
