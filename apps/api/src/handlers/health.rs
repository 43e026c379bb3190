//! Health check endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub timestamp: String,
}

/// Reports whether the store answers a trivial query.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let healthy = state.db.health_check().await;

    let (status, body) = if healthy {
        (StatusCode::OK, ("ok", "connected"))
    } else {
        tracing::warn!("Health check failed: database unreachable");
        (StatusCode::SERVICE_UNAVAILABLE, ("degraded", "unavailable"))
    };

    (
        status,
        Json(HealthResponse {
            status: body.0,
            database: body.1,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }),
    )
}
