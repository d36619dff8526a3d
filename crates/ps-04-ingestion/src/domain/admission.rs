//! # Admission Gate
//!
//! One process-wide token bucket (GCRA via `governor`) in front of
//! ingestion. It throttles aggregate load, not individual keys: once the
//! bucket is empty every client is denied until it refills.

use governor::{
    clock::{Clock, DefaultClock},
    middleware::NoOpMiddleware,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::time::Duration;
use tracing::debug;

use super::config::{AdmissionConfig, ConfigError};
use crate::ports::outbound::AdmissionControl;

type DirectLimiter<C> =
    RateLimiter<NotKeyed, InMemoryState, C, NoOpMiddleware<<C as Clock>::Instant>>;

/// Global admission gate.
pub struct AdmissionGate<C: Clock = DefaultClock> {
    limiter: DirectLimiter<C>,
    clock: C,
    requests_per_second: u32,
}

impl AdmissionGate<DefaultClock> {
    pub fn new(config: &AdmissionConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, DefaultClock::default())
    }
}

impl<C: Clock> AdmissionGate<C> {
    /// Build a gate on an explicit clock (tests use `FakeRelativeClock`).
    pub fn with_clock(config: &AdmissionConfig, clock: C) -> Result<Self, ConfigError> {
        let quota = Quota::per_second(config.rate()?).allow_burst(config.burst()?);
        Ok(Self {
            limiter: RateLimiter::direct_with_clock(quota, &clock),
            clock,
            requests_per_second: config.requests_per_second,
        })
    }
}

impl<C> AdmissionControl for AdmissionGate<C>
where
    C: Clock + Send + Sync,
    C::Instant: Send + Sync,
{
    fn try_acquire(&self) -> Result<(), Duration> {
        match self.limiter.check() {
            Ok(()) => Ok(()),
            Err(not_until) => {
                let wait = not_until.wait_time_from(self.clock.now());
                debug!(wait_ms = wait.as_millis() as u64, "Admission denied");
                Err(wait)
            }
        }
    }

    fn ceiling(&self) -> u32 {
        self.requests_per_second
    }
}
