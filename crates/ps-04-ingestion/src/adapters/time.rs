//! System clock adapter.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::ports::outbound::TimeSource;

/// `TimeSource` backed by `SystemTime`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now_nanos(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }
}
