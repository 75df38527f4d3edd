//! Sunrise/Sunset Widgets
//!
//! Two widgets share the board's sun-times slot. `SunTimesWidget` fetches
//! sunrise and sunset once at bootstrap, renders both time regions and
//! seeds the arc. `SunArcWidget` re-maps the indicator onto the daylight
//! arc every minute from the stored times, with no further network use.

use super::{get_json, short_time, Widget, WidgetError};
use crate::astro::{sun_position, SunTimes};
use crate::board::{Board, RegionContent, RegionUpdate};
use crate::config::LocationConfig;
use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use serde::Deserialize;
use std::time::Duration;

const BASE_URL: &str = "https://api.sunrise-sunset.org/json";

const ARC_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

pub struct SunTimesWidget {
    client: reqwest::Client,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct SunResponse {
    status: String,
    results: Option<SunResults>,
}

#[derive(Debug, Deserialize)]
struct SunResults {
    sunrise: DateTime<Utc>,
    sunset: DateTime<Utc>,
}

impl SunTimesWidget {
    pub fn new(client: reqwest::Client, location: &LocationConfig) -> Self {
        Self {
            client,
            latitude: location.latitude,
            longitude: location.longitude,
        }
    }

    fn url(&self) -> String {
        // formatted=0 makes the provider return ISO-8601 UTC instants
        format!(
            "{}?lat={}&lng={}&formatted=0",
            BASE_URL, self.latitude, self.longitude
        )
    }
}

#[async_trait]
impl Widget for SunTimesWidget {
    fn name(&self) -> &'static str {
        "sun-times"
    }

    fn primary_region(&self) -> &'static str {
        "sunrise-time"
    }

    fn fallback(&self) -> &'static str {
        "Sun times unavailable"
    }

    async fn refresh(&self, board: &Board) -> Result<Vec<RegionUpdate>, WidgetError> {
        let response: SunResponse = get_json(&self.client, &self.url()).await?;

        if response.status != "OK" {
            return Err(WidgetError::Parse(format!(
                "provider status {}",
                response.status
            )));
        }
        let results = response.results.ok_or(WidgetError::MissingField("results"))?;

        let times = SunTimes {
            sunrise: results.sunrise,
            sunset: results.sunset,
        };
        board.set_sun_times(times).await;

        Ok(vec![
            RegionUpdate::new(
                "sunrise-time",
                RegionContent::text(short_time(times.sunrise.with_timezone(&Local).time())),
            ),
            RegionUpdate::new(
                "sunset-time",
                RegionContent::text(short_time(times.sunset.with_timezone(&Local).time())),
            ),
            // Seed the arc immediately instead of waiting for its next tick
            arc_update(Utc::now(), &times),
        ])
    }
}

/// Minute ticker that re-derives the arc indicator from the stored sun
/// times. Emits nothing until the fetcher has populated them.
pub struct SunArcWidget;

#[async_trait]
impl Widget for SunArcWidget {
    fn name(&self) -> &'static str {
        "sun-arc"
    }

    fn primary_region(&self) -> &'static str {
        "sun-arc"
    }

    fn refresh_interval(&self) -> Option<Duration> {
        Some(ARC_REFRESH_INTERVAL)
    }

    fn fallback(&self) -> &'static str {
        "Sun position unavailable."
    }

    async fn refresh(&self, board: &Board) -> Result<Vec<RegionUpdate>, WidgetError> {
        match board.sun_times().await {
            Some(times) => Ok(vec![arc_update(Utc::now(), &times)]),
            None => Ok(Vec::new()),
        }
    }
}

fn arc_update(now: DateTime<Utc>, times: &SunTimes) -> RegionUpdate {
    let pos = sun_position(now, times);
    RegionUpdate::new(
        "sun-arc",
        RegionContent::SunArc {
            active: true,
            percentage: pos.percentage,
            x: pos.x,
            y: pos.y,
            is_daylight: pos.is_daylight,
        },
    )
}
