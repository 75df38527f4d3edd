//! Theme Routes
//!
//! - GET /api/v1/theme - Current theme and the available set
//! - PUT /api/v1/theme - Switch themes (validated and persisted)

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{SetThemeRequest, ThemeResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /api/v1/theme
pub async fn get_theme(State(state): State<Arc<AppState>>) -> Json<ThemeResponse> {
    Json(ThemeResponse {
        theme: state.board.theme().await,
        available: state.themes.available().to_vec(),
    })
}

/// PUT /api/v1/theme
///
/// Persist first, then apply; a rejected identifier never reaches the
/// board or the live connections.
pub async fn set_theme(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SetThemeRequest>,
) -> ApiResult<Json<ThemeResponse>> {
    state.themes.save(&request.theme)?;
    state.board.set_theme(&request.theme).await;

    Ok(Json(ThemeResponse {
        theme: request.theme,
        available: state.themes.available().to_vec(),
    }))
}
