//! Health Routes
//!
//! Health check endpoints for monitoring and probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (ready to serve traffic)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Ready once the board is serveable, which is immediately; regions that
/// have not loaded yet simply are not in the snapshot.
pub async fn readiness() -> StatusCode {
    StatusCode::OK
}

/// GET /health
///
/// Full health status. "degraded" means at least one region is showing
/// fallback content; the service itself is still healthy.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let degraded_regions = state.board.degraded_count().await;
    let widgets = state.scheduler.status().await.len();

    let status = if degraded_regions == 0 {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        widgets,
        degraded_regions,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn liveness_is_always_ok() {
        assert_eq!(liveness().await, StatusCode::OK);
    }
}
