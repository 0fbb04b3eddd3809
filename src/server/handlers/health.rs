//! Liveness handler.

use axum::Json;

use super::super::types::HealthResponse;

/// Always answers `{"status":"ok"}` while the process is serving.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
