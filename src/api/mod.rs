//! Daydash REST API
//!
//! HTTP API layer for the dashboard, built with Axum. The view layer
//! loads a snapshot over REST and then follows changes over the
//! WebSocket; everything else here is operational surface.
//!
//! # Endpoints
//!
//! ## Board
//! - `GET /api/v1/board` - Full board snapshot
//! - `GET /api/v1/board/regions/:name` - One region
//!
//! ## Theme
//! - `GET /api/v1/theme` - Current theme and available set
//! - `PUT /api/v1/theme` - Switch themes
//!
//! ## Widgets
//! - `GET /api/v1/widgets` - Scheduler status for every widget
//! - `POST /api/v1/widgets/:name/refresh` - Trigger a refresh now
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! ## WebSocket
//! - `GET /ws` - Live board push connection

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::ws::websocket_handler;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/board", get(routes::board::get_board))
        .route("/board/regions/:name", get(routes::board::get_region))
        .route("/theme", get(routes::theme::get_theme))
        .route("/theme", put(routes::theme::set_theme))
        .route("/widgets", get(routes::widgets::list_widgets))
        .route("/widgets/:name/refresh", post(routes::widgets::refresh_widget));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .route("/ws", get(websocket_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()) // The view layer is served from elsewhere
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, addr: &str) -> Result<(), ApiError> {
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Daydash API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Daydash API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, RegionContent, RegionUpdate};
    use crate::scheduler::WidgetScheduler;
    use crate::theme::ThemeStore;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tempfile::tempdir;
    use tower::util::ServiceExt;

    async fn create_test_app() -> (Router, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let board = Board::new("floral");
        board
            .apply(vec![RegionUpdate::new("quote", RegionContent::text("hi"))])
            .await;

        let scheduler = Arc::new(WidgetScheduler::new(board.clone()));
        let themes = Arc::new(ThemeStore::new(
            dir.path().join("theme"),
            "floral",
            vec!["floral".into(), "midnight".into()],
        ));

        let state = AppState::new(board, scheduler, themes);
        (build_router(state), dir)
    }

    #[tokio::test]
    async fn health_live() {
        let (app, _dir) = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn health_full_reports_healthy() {
        let (app, _dir) = create_test_app().await;

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["degraded_regions"], 0);
    }

    #[tokio::test]
    async fn board_snapshot_carries_regions_and_theme() {
        let (app, _dir) = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/board")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["theme"], "floral");
        assert_eq!(json["regions"]["quote"]["content"]["kind"], "text");
    }

    #[tokio::test]
    async fn missing_region_is_404() {
        let (app, _dir) = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/board/regions/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn theme_round_trip() {
        let (app, _dir) = create_test_app().await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/api/v1/theme")
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"theme": "midnight"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/theme")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["theme"], "midnight");
    }

    #[tokio::test]
    async fn unknown_theme_is_400() {
        let (app, _dir) = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/api/v1/theme")
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"theme": "neon"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn refresh_of_unknown_widget_is_404() {
        let (app, _dir) = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/widgets/nope/refresh")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn widget_list_is_empty_without_registrations() {
        let (app, _dir) = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/widgets")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!([]));
    }
}
