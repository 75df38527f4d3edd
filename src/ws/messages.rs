//! WebSocket Message Types
//!
//! Server-to-client messages. All are JSON with a `type` tag the view
//! layer switches on.

use crate::board::{BoardEvent, BoardSnapshot, RegionState};
use serde::Serialize;

/// Messages pushed to a view connection
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Full board state, sent on connect and after an event-stream gap
    Snapshot { snapshot: BoardSnapshot },
    /// One render target changed
    RegionUpdated { region: String, state: RegionState },
    /// The active theme changed
    ThemeChanged { theme: String },
}

impl From<BoardEvent> for ServerMessage {
    fn from(event: BoardEvent) -> Self {
        match event {
            BoardEvent::RegionUpdated { region, state } => {
                ServerMessage::RegionUpdated { region, state }
            }
            BoardEvent::ThemeChanged { theme } => ServerMessage::ThemeChanged { theme },
        }
    }
}
