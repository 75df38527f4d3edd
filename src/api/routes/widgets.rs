//! Widget Routes
//!
//! - GET /api/v1/widgets - Scheduler status for every widget
//! - POST /api/v1/widgets/:name/refresh - Trigger a refresh now

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::scheduler::{SchedulerError, WidgetStatus};

/// GET /api/v1/widgets
pub async fn list_widgets(State(state): State<Arc<AppState>>) -> Json<Vec<WidgetStatus>> {
    Json(state.scheduler.status().await)
}

/// POST /api/v1/widgets/:name/refresh
///
/// Runs the refresh to completion; the response carries the widget's
/// status afterwards. A failed fetch is still a 200, visible in the
/// status as an error count and a degraded region.
pub async fn refresh_widget(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<WidgetStatus>> {
    state.scheduler.trigger(&name).await.map_err(|e| match e {
        SchedulerError::UnknownWidget(name) => ApiError::NotFound(format!("widget {}", name)),
    })?;

    state
        .scheduler
        .widget_status(&name)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::Internal(format!("widget {} vanished", name)))
}
