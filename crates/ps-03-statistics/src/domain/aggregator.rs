//! # Snapshot Aggregation
//!
//! `aggregate` is a pure function of the stored updates (ascending by id)
//! and the request counters. Running it twice on the same input yields the
//! same snapshot.

use shared_types::{
    RequestCounters, StatisticsSnapshot, StatusUpdate, BODY_MAX_SIZE, LINK_MAX_SIZE, PUBKEY_SIZE,
    SIGNATURE_SIZE, TOP_PROLIFIC_LIMIT,
};

use super::post_counts::PostCounts;

/// Configured limits copied into every snapshot for client convenience.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotLimits {
    pub body_max_size: usize,
    pub link_max_size: usize,
    pub pubkey_max_size: usize,
    pub signature_max_size: usize,
    pub rate_limit_requests_per_second: u32,
}

impl SnapshotLimits {
    /// Protocol size limits with the given admission ceiling.
    pub fn with_rate_limit(requests_per_second: u32) -> Self {
        Self {
            body_max_size: BODY_MAX_SIZE,
            link_max_size: LINK_MAX_SIZE,
            pubkey_max_size: PUBKEY_SIZE,
            signature_max_size: SIGNATURE_SIZE,
            rate_limit_requests_per_second: requests_per_second,
        }
    }
}

/// Compute a snapshot from `updates` in insertion order.
pub fn aggregate(
    updates: &[StatusUpdate],
    counters: RequestCounters,
    limits: &SnapshotLimits,
) -> StatisticsSnapshot {
    let counts: PostCounts = updates.iter().map(|u| u.pubkey).collect();

    let unique = counts.len() as u64;
    let total_posts = updates.len() as u64;
    let average = if unique == 0 {
        0.0
    } else {
        total_posts as f64 / unique as f64
    };

    let most_recent = updates.iter().max_by_key(|u| u.id).map_or(0, |u| u.timestamp);
    let oldest = updates.iter().min_by_key(|u| u.id).map_or(0, |u| u.timestamp);

    StatisticsSnapshot {
        total_posts,
        unique_pubkeys: unique,
        successful_requests: counters.successful,
        failed_requests: counters.failed,
        total_requests: counters.total(),
        body_max_size: limits.body_max_size,
        link_max_size: limits.link_max_size,
        pubkey_max_size: limits.pubkey_max_size,
        signature_max_size: limits.signature_max_size,
        top_prolific_pubkeys: counts.top(TOP_PROLIFIC_LIMIT),
        average_posts_per_pubkey: average,
        most_recent_post_timestamp: most_recent,
        oldest_post_timestamp: oldest,
        rate_limit_requests_per_second: limits.rate_limit_requests_per_second,
    }
}
