//! Operational endpoints that sit beside the user directory.

use axum::{Json, extract::State};
use serde::Serialize;
use std::sync::Arc;

use super::{ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
    pub version: &'static str,
    pub uptime_seconds: u64,
}

/// `GET /health`
///
/// Liveness probe. Database reachability is reported but does not change
/// the status code.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthResponse>> {
    let database = match state.store().ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Health check could not reach database: {}", e);
            false
        }
    };

    Json(ApiResponse::success(
        "Service is running",
        HealthResponse {
            status: "alive",
            database,
            version: env!("CARGO_PKG_VERSION"),
            uptime_seconds: state.start_time.elapsed().as_secs(),
        },
    ))
}
