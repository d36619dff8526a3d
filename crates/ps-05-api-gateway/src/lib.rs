//! # API Gateway Subsystem (PS-05)
//!
//! REST interface over ingestion and statistics.
//!
//! ## Routes
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | POST | `/status` | submit a signed update |
//! | GET | `/status` | all updates, newest first |
//! | GET | `/status/:pubkey` | one key's updates, newest first |
//! | GET | `/stats` | statistics snapshot |
//! | GET | `/health` | liveness |
//! | GET | `/metrics` | Prometheus text format |
//!
//! ## Status codes
//!
//! 200 on success, 400 for malformed or unauthorized input, 429 when the
//! admission gate denies, 500 for storage failures. Error bodies are plain
//! text.

pub mod domain;
pub mod handlers;
pub mod middleware;
pub mod service;

pub use domain::config::{CorsConfig, GatewayConfig, HttpConfig, LimitsConfig};
pub use domain::error::{ApiError, ConfigError, GatewayError};
pub use service::{build_router, ApiGatewayService, AppState};
