//! System endpoints: liveness, readiness, metrics.

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{LivenessResponse, ReadinessResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};

/// `GET /healthz` — Liveness check. Never touches the database.
#[utoipa::path(
    get,
    path = "/healthz",
    tag = "System",
    summary = "Liveness check",
    description = "Answers as long as the process is serving requests. No dependency checks.",
    responses(
        (status = 200, description = "Process is alive", body = LivenessResponse),
    )
)]
pub async fn liveness_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(LivenessResponse::alive()))
}

/// `GET /ready` — Readiness check. Runs a trivial query against the store.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "System",
    summary = "Readiness check",
    description = "Runs `SELECT 1` against the database. Returns 503 with the failure message when the database is unreachable.",
    responses(
        (status = 200, description = "Database reachable", body = ReadinessResponse),
        (status = 503, description = "Database unreachable", body = ReadinessResponse),
    )
)]
pub async fn readiness_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(ReadinessResponse::ready())),
        Err(err) => {
            tracing::warn!(error = %err, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadinessResponse::not_ready(err.to_string())),
            )
        }
    }
}

/// `GET /metrics` — Prometheus text exposition.
///
/// # Errors
///
/// Returns [`GatewayError::Metrics`] if the registry cannot be encoded.
#[utoipa::path(
    get,
    path = "/metrics",
    tag = "System",
    summary = "Prometheus metrics",
    description = "Process and HTTP metrics in the Prometheus text exposition format.",
    responses(
        (status = 200, description = "Metrics snapshot", content_type = "text/plain", body = String),
        (status = 500, description = "Encoding failed", body = ErrorResponse),
    )
)]
pub async fn metrics_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, GatewayError> {
    let body = state.metrics.gather_and_encode()?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)],
        body,
    ))
}

/// System routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(liveness_handler))
        .route("/ready", get(readiness_handler))
        .route("/metrics", get(metrics_handler))
}
