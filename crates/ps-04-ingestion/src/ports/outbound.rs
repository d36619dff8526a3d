//! # Outbound Ports (Driven Ports)
//!
//! Dependencies required by the ingestion service.

use std::time::Duration;

/// Non-blocking admission control in front of ingestion.
///
/// Production: `AdmissionGate` (one global bucket)
pub trait AdmissionControl: Send + Sync {
    /// Take one token or report how long until one is available.
    ///
    /// Never sleeps or queues. A denial consumes nothing.
    fn try_acquire(&self) -> Result<(), Duration>;

    /// Configured sustained rate, copied into statistics snapshots.
    fn ceiling(&self) -> u32;
}

/// Wall clock used to stamp accepted updates.
///
/// Production: `SystemTimeSource`
pub trait TimeSource: Send + Sync {
    /// Nanoseconds since the UNIX epoch.
    fn now_nanos(&self) -> u64;
}
