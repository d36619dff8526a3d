//! Cross-subsystem flows.

pub mod http_flows;
pub mod ingestion_flows;
pub mod statistics_flows;
