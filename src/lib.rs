//! # Daydash
//!
//! Personal dashboard service. Widgets fetch tides, weather, sun times,
//! sports schedules and trivia from public APIs (or compute them
//! locally), refresh named board regions on independent timers, and the
//! resulting board is served to a browser view over REST and WebSocket.
//!
//! ## Modules
//!
//! - [`board`]: Shared board state and its change-event stream
//! - [`widgets`]: One fetcher/calculator per data source
//! - [`scheduler`]: Per-widget refresh timers with stale-result discard
//! - [`astro`]: Moon phase and sun arc math
//! - [`api`]: REST API server with Axum
//! - [`ws`]: Live board push over WebSocket
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use daydash::api::{serve, AppState};
//! use daydash::board::Board;
//! use daydash::config::Config;
//! use daydash::scheduler::WidgetScheduler;
//! use daydash::theme::ThemeStore;
//! use daydash::widgets::build_registry;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let client = reqwest::Client::new();
//!
//!     let themes = Arc::new(ThemeStore::new(
//!         ThemeStore::default_path(),
//!         config.theme.default.clone(),
//!         config.theme.available.clone(),
//!     ));
//!     let board = Board::new(themes.load());
//!
//!     let scheduler = Arc::new(WidgetScheduler::new(board.clone()));
//!     scheduler.register_all(build_registry(&config, &client)).await;
//!     scheduler.clone().start();
//!
//!     serve(AppState::new(board, scheduler, themes), &config.server.addr()).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod astro;
pub mod board;
pub mod clock;
pub mod config;
pub mod scheduler;
pub mod theme;
pub mod widgets;
pub mod ws;

// Re-export top-level types for convenience
pub use api::{build_router, serve, ApiError, AppState};

pub use astro::{moon_phase, sun_position, MoonPhase, PhaseName, SunPosition, SunTimes};

pub use board::{Board, BoardEvent, BoardSnapshot, RegionContent, RegionState, RegionUpdate};

pub use config::{Config, ConfigError};

pub use scheduler::{RefreshStatus, SchedulerError, WidgetScheduler, WidgetStatus};

pub use theme::{ThemeError, ThemeStore};

pub use widgets::{build_registry, Widget, WidgetError};

pub use ws::{websocket_handler, ServerMessage};
