//! Health check and liveness endpoints
//!
//! Used by load balancers, container orchestrators, and uptime monitors to
//! verify service availability.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::server::AppState;

/// Root liveness probe. Answers as long as the process is up.
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Conecta API is running" }))
}

/// Readiness probe: verifies a database round trip.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.db.health_check().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(err) => {
            tracing::error!("health check failed: {err:#}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable" })),
            )
        }
    }
}
