//! Route handlers.
//!
//! Each handler delegates to ingestion or statistics and maps failures
//! through `ApiError`. Work that touches storage or the verifier runs on
//! the blocking pool.

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use ps_telemetry::encode_metrics;
use serde_json::{json, Value};
use shared_types::{StatisticsSnapshot, StatusUpdate};
use tracing::{debug, error};

use crate::domain::error::ApiError;
use crate::service::AppState;

const INVALID_PAYLOAD: &str = "Invalid request payload";
const INVALID_PUBLIC_KEY: &str = "Invalid public key";

async fn run_blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|e| {
        error!(error = %e, "Blocking task failed");
        ApiError::internal()
    })?
}

/// `POST /status`
pub async fn post_status(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<StatusUpdate>, ApiError> {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            debug!(error = %rejection, "Request body rejected");
            return Err(state.ingestion.reject_malformed(INVALID_PAYLOAD).into());
        }
    };
    let ingestion = state.ingestion.clone();
    run_blocking(move || Ok(ingestion.submit(&body)?))
        .await
        .map(Json)
}

/// `GET /status`
pub async fn list_status(State(state): State<AppState>) -> Result<Json<Vec<StatusUpdate>>, ApiError> {
    let ingestion = state.ingestion.clone();
    run_blocking(move || Ok(ingestion.all_updates()?))
        .await
        .map(Json)
}

/// `GET /status/:pubkey`
pub async fn status_by_key(
    State(state): State<AppState>,
    pubkey: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<StatusUpdate>>, ApiError> {
    let pubkey = match pubkey {
        Ok(Path(pubkey)) => pubkey,
        Err(rejection) => {
            debug!(error = %rejection, "Path segment rejected");
            return Err(state.ingestion.reject_malformed(INVALID_PUBLIC_KEY).into());
        }
    };
    let ingestion = state.ingestion.clone();
    run_blocking(move || Ok(ingestion.updates_by_key(&pubkey)?))
        .await
        .map(Json)
}

/// `GET /stats`
pub async fn stats(State(state): State<AppState>) -> Result<Json<StatisticsSnapshot>, ApiError> {
    let statistics = state.statistics.clone();
    run_blocking(move || {
        statistics.snapshot().map_err(|e| {
            error!(error = %e, "Failed to compute statistics");
            ApiError::internal()
        })
    })
    .await
    .map(Json)
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `GET /metrics`
pub async fn metrics() -> Result<impl IntoResponse, ApiError> {
    let body = encode_metrics().map_err(|e| {
        error!(error = %e, "Failed to encode metrics");
        ApiError::internal()
    })?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    ))
}
