//! Handlers of the status API.
use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;
use axum::Json;

use super::resources::{Report, Status};
use super::responses::{status_error_response, status_response};
use crate::core::cache::CacheGate;

/// It handles the request to get the status of every download.
pub async fn status_handler(State(gate): State<Arc<CacheGate>>) -> Response {
    match gate.get_snapshot().await {
        Ok(snapshot) => status_response(&snapshot),
        Err(err) => status_error_response(&err),
    }
}

/// Endpoint for container health check.
pub async fn health_check_handler() -> Json<Report> {
    Json(Report { status: Status::Ok })
}
