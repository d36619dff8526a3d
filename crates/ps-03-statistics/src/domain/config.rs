//! # Statistics Configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::service::StatisticsMode;

/// How snapshot reads are served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatisticsModeKind {
    /// Recompute on every read.
    #[default]
    #[serde(alias = "synchronous")]
    Sync,
    /// Serve the last persisted snapshot; a background task refreshes it.
    Periodic,
}

impl std::str::FromStr for StatisticsModeKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sync" | "synchronous" => Ok(Self::Sync),
            "periodic" => Ok(Self::Periodic),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

/// Statistics configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatisticsConfig {
    pub mode: StatisticsModeKind,
    /// Refresh interval in periodic mode.
    pub refresh_interval_secs: u64,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            mode: StatisticsModeKind::Sync,
            refresh_interval_secs: 1,
        }
    }
}

impl StatisticsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mode == StatisticsModeKind::Periodic && self.refresh_interval_secs == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }

    pub fn mode(&self) -> StatisticsMode {
        match self.mode {
            StatisticsModeKind::Sync => StatisticsMode::Synchronous,
            StatisticsModeKind::Periodic => StatisticsMode::Periodic {
                interval: Duration::from_secs(self.refresh_interval_secs),
            },
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Unknown statistics mode: {0} (expected sync or periodic)")]
    UnknownMode(String),

    #[error("Periodic statistics need a refresh interval above zero")]
    ZeroInterval,
}
