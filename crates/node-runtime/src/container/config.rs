//! # Node Configuration
//!
//! Unified configuration for all subsystems.
//!
//! ## Load order
//!
//! 1. Defaults
//! 2. Optional TOML file (`--config`)
//! 3. Environment overrides
//! 4. `validate()`
//!
//! ## Environment Variables
//!
//! | Variable | Field |
//! |----------|-------|
//! | `PS_PORT` | `gateway.http.port` |
//! | `PS_DATA_DIR` | `storage.data_dir` |
//! | `PS_STORAGE` | `storage.backend` (`memory` or `rocksdb`) |
//! | `PS_RATE_LIMIT_PER_SECOND` | `admission.requests_per_second` |
//! | `PS_RATE_LIMIT_BURST` | `admission.burst_size` |
//! | `PS_STATS_MODE` | `statistics.mode` (`sync` or `periodic`) |
//! | `PS_STATS_INTERVAL_SECS` | `statistics.refresh_interval_secs` |
//!
//! Telemetry variables are documented in `ps-telemetry`.

use ps_03_statistics::{StatisticsConfig, StatisticsModeKind};
use ps_04_ingestion::AdmissionConfig;
use ps_05_api_gateway::GatewayConfig;
use ps_telemetry::TelemetryConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Complete node configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// HTTP server configuration.
    pub gateway: GatewayConfig,
    /// Global admission gate.
    pub admission: AdmissionConfig,
    /// Statistics read mode.
    pub statistics: StatisticsConfig,
    /// Storage backend.
    pub storage: StorageConfig,
    /// Logging.
    pub telemetry: TelemetryConfig,
}

/// Storage backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Rocksdb,
}

impl Default for StorageBackend {
    fn default() -> Self {
        if cfg!(feature = "rocksdb") {
            Self::Rocksdb
        } else {
            Self::Memory
        }
    }
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "rocksdb" => Ok(Self::Rocksdb),
            _ => Err(ConfigError::InvalidEnv {
                var: "PS_STORAGE",
                value: s.to_string(),
            }),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Data directory for the RocksDB backend.
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: PathBuf::from("./data/postshortly"),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("Failed to parse config file: {0}")]
    Parse(String),

    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("Storage backend {0} is not compiled in")]
    BackendUnavailable(&'static str),

    #[error(transparent)]
    Gateway(#[from] ps_05_api_gateway::ConfigError),

    #[error(transparent)]
    Admission(#[from] ps_04_ingestion::ConfigError),

    #[error(transparent)]
    Statistics(#[from] ps_03_statistics::ConfigError),
}

impl NodeConfig {
    /// Load from an optional TOML file, apply environment overrides and
    /// validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.with_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML file. Missing sections fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        self.telemetry = self.telemetry.with_env_overrides();
        self.apply_overrides(|var| std::env::var(var).ok())?;
        Ok(self)
    }

    /// Apply overrides from any variable lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("PS_PORT") {
            self.gateway.http.port = parse_var("PS_PORT", v)?;
        }
        if let Some(v) = lookup("PS_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("PS_STORAGE") {
            self.storage.backend = v.parse()?;
        }
        if let Some(v) = lookup("PS_RATE_LIMIT_PER_SECOND") {
            self.admission.requests_per_second = parse_var("PS_RATE_LIMIT_PER_SECOND", v)?;
        }
        if let Some(v) = lookup("PS_RATE_LIMIT_BURST") {
            self.admission.burst_size = parse_var("PS_RATE_LIMIT_BURST", v)?;
        }
        if let Some(v) = lookup("PS_STATS_MODE") {
            self.statistics.mode = StatisticsModeKind::from_str(&v)?;
        }
        if let Some(v) = lookup("PS_STATS_INTERVAL_SECS") {
            self.statistics.refresh_interval_secs = parse_var("PS_STATS_INTERVAL_SECS", v)?;
        }
        Ok(())
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gateway.validate()?;
        self.admission.validate()?;
        self.statistics.validate()?;
        if self.storage.backend == StorageBackend::Rocksdb && !cfg!(feature = "rocksdb") {
            return Err(ConfigError::BackendUnavailable("rocksdb"));
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { var, value })
}
