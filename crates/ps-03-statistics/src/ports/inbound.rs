//! # Inbound Ports (Driving Ports / API)

use shared_types::StatisticsSnapshot;

use crate::domain::errors::StatisticsError;

/// Statistics read contract, identical in both modes.
pub trait StatisticsApi: Send + Sync {
    /// The current snapshot. Fresh in synchronous mode, at most one refresh
    /// interval old in periodic mode.
    fn snapshot(&self) -> Result<StatisticsSnapshot, StatisticsError>;
}
