//! Admission configuration with validation.

use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use thiserror::Error;

/// Global admission gate configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdmissionConfig {
    /// Sustained refill rate
    pub requests_per_second: u32,
    /// Bucket capacity
    pub burst_size: u32,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 1,
            burst_size: 1,
        }
    }
}

impl AdmissionConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rate()?;
        self.burst()?;
        Ok(())
    }

    pub(crate) fn rate(&self) -> Result<NonZeroU32, ConfigError> {
        NonZeroU32::new(self.requests_per_second).ok_or_else(|| {
            ConfigError::InvalidRateLimit("requests_per_second cannot be 0".into())
        })
    }

    pub(crate) fn burst(&self) -> Result<NonZeroU32, ConfigError> {
        NonZeroU32::new(self.burst_size)
            .ok_or_else(|| ConfigError::InvalidRateLimit("burst_size cannot be 0".into()))
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid rate limit: {0}")]
    InvalidRateLimit(String),
}
