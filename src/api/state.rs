//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::board::Board;
use crate::scheduler::WidgetScheduler;
use crate::theme::ThemeStore;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// The live board the widgets write and the view layer reads
    pub board: Arc<Board>,
    /// Scheduler, for widget status and manual refreshes
    pub scheduler: Arc<WidgetScheduler>,
    /// Theme persistence and validation
    pub themes: Arc<ThemeStore>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        board: Arc<Board>,
        scheduler: Arc<WidgetScheduler>,
        themes: Arc<ThemeStore>,
    ) -> Self {
        Self {
            board,
            scheduler,
            themes,
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
