//! Health check endpoints.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::AppState;

/// Create the health router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Basic health check.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadinessResponse {
    status: &'static str,
    database: bool,
}

/// Readiness check: verifies the store answers a query.
#[utoipa::path(
    get,
    path = "/ready",
    responses((status = 200, description = "Readiness state", body = ReadinessResponse)),
    tag = "health"
)]
pub async fn readiness_check(State(state): State<AppState>) -> Json<ReadinessResponse> {
    let database = state.store.list_forms().await.is_ok();

    Json(ReadinessResponse {
        status: if database { "ready" } else { "degraded" },
        database,
    })
}
