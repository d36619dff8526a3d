//! Prometheus metrics for postshortly subsystems.
//!
//! All metrics follow the naming convention: `ps_<subsystem>_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: Monotonically increasing value (e.g., updates_accepted_total)
//! - **Gauge**: Value that can go up or down (e.g., updates_stored)
//! - **Histogram**: Distribution of values (e.g., recompute_duration_seconds)

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Gauge, Histogram, HistogramOpts, Opts,
    Registry, TextEncoder,
};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // INGESTION METRICS
    // =========================================================================

    /// Updates admitted and stored
    pub static ref UPDATES_ACCEPTED: Counter = Counter::new(
        "ps_ingestion_updates_accepted_total",
        "Total number of status updates accepted"
    ).expect("metric creation failed");

    /// Rejected submissions by reason
    pub static ref UPDATES_REJECTED: CounterVec = CounterVec::new(
        Opts::new("ps_ingestion_updates_rejected_total", "Rejected requests by reason"),
        &["reason"]  // rate_limited, bad_format, unauthorized, storage_failure
    ).expect("metric creation failed");

    // =========================================================================
    // SIGNATURE METRICS
    // =========================================================================

    /// Signature checks by outcome
    pub static ref SIGNATURE_VERIFICATIONS: CounterVec = CounterVec::new(
        Opts::new("ps_signature_verifications_total", "Update verifications by outcome"),
        &["outcome"]  // valid, bad_format, mismatch
    ).expect("metric creation failed");

    // =========================================================================
    // STATISTICS METRICS
    // =========================================================================

    /// Snapshot recompute duration
    pub static ref STATISTICS_RECOMPUTE_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "ps_statistics_recompute_duration_seconds",
            "Time spent recomputing the statistics snapshot"
        ).buckets(exponential_buckets(0.0001, 2.0, 14).expect("valid buckets"))
    ).expect("metric creation failed");

    // =========================================================================
    // STORAGE METRICS
    // =========================================================================

    /// Updates currently held by the store
    pub static ref UPDATES_STORED: Gauge = Gauge::new(
        "ps_storage_updates_stored",
        "Number of status updates in storage"
    ).expect("metric creation failed");
}

/// Handle to the registered metrics
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry.
///
/// Safe to call more than once: already registered collectors are skipped.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Ingestion
        Box::new(UPDATES_ACCEPTED.clone()),
        Box::new(UPDATES_REJECTED.clone()),
        // Signatures
        Box::new(SIGNATURE_VERIFICATIONS.clone()),
        // Statistics
        Box::new(STATISTICS_RECOMPUTE_DURATION.clone()),
        // Storage
        Box::new(UPDATES_STORED.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}

/// Start timing for a histogram. Observation happens on drop.
#[macro_export]
macro_rules! time_histogram {
    ($histogram:expr) => {
        $crate::metrics::HistogramTimer::new(&$histogram)
    };
}
