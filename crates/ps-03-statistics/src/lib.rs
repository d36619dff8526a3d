//! # Statistics Subsystem (PS-03)
//!
//! Derives a `StatisticsSnapshot` from the stored updates and the running
//! request counters. The snapshot is never mutated in place; it is always
//! recomputed.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): `PostCounts` ranking, the pure `aggregate`
//!   function, configuration
//! - **Ports Layer** (`ports/`): `StatisticsApi` (inbound), `LedgerReader`
//!   (outbound, implemented by ingestion)
//! - **Service Layer** (`service.rs`): Synchronous and periodic read modes
//! - **Refresher** (`refresher.rs`): The periodic recompute task
//!
//! ## Modes
//!
//! | Mode | Read returns | Staleness |
//! |------|--------------|-----------|
//! | Synchronous | fresh aggregate | none |
//! | Periodic | last persisted snapshot | up to one interval |

pub mod domain;
pub mod ports;
pub mod refresher;
pub mod service;

pub use domain::aggregator::{aggregate, SnapshotLimits};
pub use domain::config::{ConfigError, StatisticsConfig, StatisticsModeKind};
pub use domain::errors::StatisticsError;
pub use domain::post_counts::PostCounts;
pub use ports::inbound::StatisticsApi;
pub use ports::outbound::{LedgerReader, LedgerView};
pub use refresher::run_refresher;
pub use service::{StatisticsMode, StatisticsService};
