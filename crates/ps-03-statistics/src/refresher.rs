//! # Periodic Refresher
//!
//! The only background task in the node. Each tick recomputes the snapshot,
//! persists it in one write and logs the live summary. The recompute is
//! synchronous inside the tick, so shutdown is only observed between ticks
//! and a snapshot is never half-applied.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::service::StatisticsService;

/// Run until `shutdown` turns true or its sender is dropped.
pub async fn run_refresher(
    service: Arc<StatisticsService>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(interval_ms = interval.as_millis() as u64, "[ps-03] Statistics refresher started");

    loop {
        if *shutdown.borrow() {
            break;
        }
        tokio::select! {
            _ = ticker.tick() => {
                match service.refresh() {
                    Ok(snapshot) => info!(
                        total_posts = snapshot.total_posts,
                        unique_pubkeys = snapshot.unique_pubkeys,
                        successful_requests = snapshot.successful_requests,
                        failed_requests = snapshot.failed_requests,
                        average_posts_per_pubkey = snapshot.average_posts_per_pubkey,
                        most_recent_post_timestamp = snapshot.most_recent_post_timestamp,
                        "Live statistics"
                    ),
                    Err(e) => warn!(error = %e, "Statistics refresh failed"),
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }

    info!("[ps-03] Shutdown signal received, refresher stopped");
}
