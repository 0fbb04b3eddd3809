//! Server state and response types.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::dns::DnsService;
use crate::error_handling::ClassifiedError;

/// Shared state for the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub dns: Arc<DnsService>,
}

impl AppState {
    pub fn new(dns: Arc<DnsService>) -> Self {
        Self { dns }
    }
}

/// JSON response for `/api/health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl IntoResponse for ClassifiedError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
