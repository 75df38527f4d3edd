//! Board Routes
//!
//! - GET /api/v1/board - Full board snapshot
//! - GET /api/v1/board/regions/:name - One region

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::board::{BoardSnapshot, RegionState};

/// GET /api/v1/board
pub async fn get_board(State(state): State<Arc<AppState>>) -> Json<BoardSnapshot> {
    Json(state.board.snapshot().await)
}

/// GET /api/v1/board/regions/:name
pub async fn get_region(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<RegionState>> {
    state
        .board
        .region(&name)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("region {}", name)))
}
