//! API Data Transfer Objects
//!
//! Request and response bodies for the REST endpoints. Board snapshots
//! and widget statuses serialize their domain types directly; only the
//! theme and health endpoints need dedicated shapes.

use serde::{Deserialize, Serialize};

/// Current theme and the identifiers a client may switch to
#[derive(Debug, Serialize, Deserialize)]
pub struct ThemeResponse {
    pub theme: String,
    pub available: Vec<String>,
}

/// Body of PUT /api/v1/theme
#[derive(Debug, Serialize, Deserialize)]
pub struct SetThemeRequest {
    pub theme: String,
}

/// Full health status
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// Number of widgets registered with the scheduler
    pub widgets: usize,
    /// Number of regions currently showing fallback content
    pub degraded_regions: usize,
    pub uptime_seconds: u64,
    pub version: String,
}
