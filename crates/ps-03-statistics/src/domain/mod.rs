//! # Domain Layer
//!
//! Pure aggregation logic.

pub mod aggregator;
pub mod config;
pub mod errors;
pub mod post_counts;
