//! # Subsystem Container
//!
//! Configuration plus the wired subsystem instances.

pub mod config;
pub mod subsystems;

pub use config::{ConfigError, NodeConfig, StorageBackend, StorageConfig};
pub use subsystems::SubsystemContainer;
