//! Dashboard Board
//!
//! The board owns everything widgets share: the region map the view layer
//! reads, the sunrise/sunset slot the sun indicator depends on, and the
//! active theme. Widgets never touch ambient globals; they receive the
//! board as an explicit context.
//!
//! Region writes are last-write-wins: overlapping refreshes of the same
//! widget simply overwrite the same render target.

pub mod content;

pub use content::{GameLine, RegionContent, RegionUpdate, TideEntry};

use crate::astro::SunTimes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

/// State of one render target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionState {
    pub content: RegionContent,
    pub updated_at: DateTime<Utc>,
    /// True when the content is a fallback message rather than fresh data
    pub degraded: bool,
}

/// Full board snapshot served to the view layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub theme: String,
    pub regions: HashMap<String, RegionState>,
}

/// Change events pushed to live view connections
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoardEvent {
    RegionUpdated { region: String, state: RegionState },
    ThemeChanged { theme: String },
}

/// Shared dashboard state
pub struct Board {
    regions: RwLock<HashMap<String, RegionState>>,
    sun_times: RwLock<Option<SunTimes>>,
    theme: RwLock<String>,
    events: broadcast::Sender<BoardEvent>,
}

/// Capacity of the change-event channel; slow view connections drop events
/// rather than stalling widget refreshes.
const EVENT_CAPACITY: usize = 256;

impl Board {
    pub fn new(theme: impl Into<String>) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Arc::new(Self {
            regions: RwLock::new(HashMap::new()),
            sun_times: RwLock::new(None),
            theme: RwLock::new(theme.into()),
            events,
        })
    }

    /// Apply a batch of region updates from one widget refresh.
    pub async fn apply(&self, updates: Vec<RegionUpdate>) {
        for update in updates {
            self.write_region(update.region, update.content, false).await;
        }
    }

    /// Write a widget's fallback message to its primary region.
    pub async fn apply_fallback(&self, region: &str, message: &str) {
        self.write_region(region.to_string(), RegionContent::text(message), true)
            .await;
    }

    async fn write_region(&self, region: String, content: RegionContent, degraded: bool) {
        let state = RegionState {
            content,
            updated_at: Utc::now(),
            degraded,
        };
        self.regions.write().await.insert(region.clone(), state.clone());

        // No subscribers is fine; ignore the send result
        let _ = self.events.send(BoardEvent::RegionUpdated { region, state });
    }

    /// Current state of one region
    pub async fn region(&self, name: &str) -> Option<RegionState> {
        self.regions.read().await.get(name).cloned()
    }

    /// Full snapshot of the board
    pub async fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            theme: self.theme.read().await.clone(),
            regions: self.regions.read().await.clone(),
        }
    }

    /// Number of regions currently showing fallback content
    pub async fn degraded_count(&self) -> usize {
        self.regions
            .read()
            .await
            .values()
            .filter(|r| r.degraded)
            .count()
    }

    /// Store sunrise and sunset together; both fields always change
    /// atomically from one provider response.
    pub async fn set_sun_times(&self, times: SunTimes) {
        *self.sun_times.write().await = Some(times);
    }

    /// Sun times, if populated at least once
    pub async fn sun_times(&self) -> Option<SunTimes> {
        *self.sun_times.read().await
    }

    /// Active theme identifier
    pub async fn theme(&self) -> String {
        self.theme.read().await.clone()
    }

    /// Apply a theme and notify live connections.
    pub async fn set_theme(&self, name: impl Into<String>) {
        let name = name.into();
        *self.theme.write().await = name.clone();
        let _ = self.events.send(BoardEvent::ThemeChanged { theme: name });
    }

    /// Subscribe to board change events.
    pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[tokio::test]
    async fn apply_overwrites_the_same_region() {
        let board = Board::new("floral");

        board
            .apply(vec![RegionUpdate::new("quote", RegionContent::text("first"))])
            .await;
        board
            .apply(vec![RegionUpdate::new("quote", RegionContent::text("second"))])
            .await;

        let state = board.region("quote").await.unwrap();
        assert_eq!(state.content, RegionContent::text("second"));
        assert!(!state.degraded);
    }

    #[tokio::test]
    async fn fallback_marks_region_degraded() {
        let board = Board::new("floral");
        board.apply_fallback("weather", "Weather unavailable").await;

        let state = board.region("weather").await.unwrap();
        assert!(state.degraded);
        assert_eq!(state.content, RegionContent::text("Weather unavailable"));
        assert_eq!(board.degraded_count().await, 1);
    }

    #[tokio::test]
    async fn sun_times_set_atomically() {
        let board = Board::new("floral");
        assert!(board.sun_times().await.is_none());

        let times = SunTimes {
            sunrise: Utc.with_ymd_and_hms(2025, 11, 27, 15, 30, 0).unwrap(),
            sunset: Utc.with_ymd_and_hms(2025, 11, 28, 0, 30, 0).unwrap(),
        };
        board.set_sun_times(times).await;
        assert_eq!(board.sun_times().await, Some(times));
    }

    #[tokio::test]
    async fn region_updates_are_broadcast() {
        let board = Board::new("floral");
        let mut rx = board.subscribe();

        board
            .apply(vec![RegionUpdate::new("joke", RegionContent::text("ha"))])
            .await;

        match rx.recv().await.unwrap() {
            BoardEvent::RegionUpdated { region, state } => {
                assert_eq!(region, "joke");
                assert_eq!(state.content, RegionContent::text("ha"));
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn theme_change_is_broadcast() {
        let board = Board::new("floral");
        let mut rx = board.subscribe();

        board.set_theme("midnight").await;
        assert_eq!(board.theme().await, "midnight");

        match rx.recv().await.unwrap() {
            BoardEvent::ThemeChanged { theme } => assert_eq!(theme, "midnight"),
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
