//! # postshortly Telemetry
//!
//! Logging and metrics for every postshortly subsystem.
//!
//! ## Components
//!
//! - **Logs**: `tracing` events rendered by `tracing-subscriber`, pretty for
//!   development or JSON for containers
//! - **Metrics**: Prometheus counters, gauges and histograms in one registry,
//!   scraped through the gateway's `/metrics` route
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ps_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let _guard = init_telemetry(TelemetryConfig::from_env()).expect("telemetry");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PS_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `PS_JSON_LOGS` | `false` | Emit JSON formatted logs |
//! | `PS_SERVICE_NAME` | `postshortly` | Service name attached to startup logs |

mod config;
pub mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{
    encode_metrics, register_metrics, HistogramTimer, MetricsHandle,
    SIGNATURE_VERIFICATIONS, STATISTICS_RECOMPUTE_DURATION, UPDATES_ACCEPTED,
    UPDATES_REJECTED, UPDATES_STORED,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracerInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),
}

/// Initialize logging and register metrics.
///
/// Returns a guard that should be held for the lifetime of the process.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let metrics = register_metrics()?;
    tracing_setup::init_tracing(&config)?;

    Ok(TelemetryGuard { _metrics: metrics })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    _metrics: MetricsHandle,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("Shutting down telemetry...");
    }
}
