//! Tide Predictions Widget
//!
//! Fetches NOAA tide predictions for a fixed station: today's low tides
//! for the main region, and the lowest daylight low tide over a 14-day
//! lookahead for the highlight region. "Daylight" here is the fixed
//! hour-of-day window [7, 17), not the fetched sunrise/sunset.

use super::{get_json, short_date, short_time, Widget, WidgetError};
use crate::board::{Board, RegionContent, RegionUpdate, TideEntry};
use crate::config::LocationConfig;
use async_trait::async_trait;
use chrono::{Local, NaiveDateTime, Timelike};
use serde::Deserialize;

const BASE_URL: &str = "https://api.tidesandcurrents.noaa.gov/api/prod/datagetter";

/// Days of predictions scanned for the lowest daylight low
const LOOKAHEAD_DAYS: i64 = 14;

/// Hour-of-day window treated as daylight for tide filtering
const DAYLIGHT_HOURS: std::ops::Range<u32> = 7..17;

pub struct TidesWidget {
    client: reqwest::Client,
    station: String,
}

#[derive(Debug, Deserialize)]
struct PredictionsResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    /// Local time, `YYYY-MM-DD HH:MM`
    t: String,
    /// Height in feet, as a decimal string
    v: String,
    /// `H` for high tide, `L` for low
    #[serde(rename = "type")]
    kind: String,
}

/// A parsed low tide event
#[derive(Debug, Clone, PartialEq)]
struct LowTide {
    time: NaiveDateTime,
    height: f64,
}

impl TidesWidget {
    pub fn new(client: reqwest::Client, location: &LocationConfig) -> Self {
        Self {
            client,
            station: location.tide_station.clone(),
        }
    }

    fn today_url(&self) -> String {
        format!(
            "{}?date=today&station={}&product=predictions&datum=MLLW\
             &time_zone=lst_ldt&units=english&interval=hilo&application=daydash&format=json",
            BASE_URL, self.station
        )
    }

    fn range_url(&self) -> String {
        let begin = Local::now().date_naive();
        let end = begin + chrono::Duration::days(LOOKAHEAD_DAYS);
        format!(
            "{}?begin_date={}&end_date={}&station={}&product=predictions&datum=MLLW\
             &time_zone=lst_ldt&units=english&interval=hilo&application=daydash&format=json",
            BASE_URL,
            begin.format("%Y%m%d"),
            end.format("%Y%m%d"),
            self.station
        )
    }
}

#[async_trait]
impl Widget for TidesWidget {
    fn name(&self) -> &'static str {
        "tides"
    }

    fn primary_region(&self) -> &'static str {
        "tides"
    }

    fn fallback(&self) -> &'static str {
        "Unable to load tide data."
    }

    async fn refresh(&self, _board: &Board) -> Result<Vec<RegionUpdate>, WidgetError> {
        let today_url = self.today_url();
        let range_url = self.range_url();
        let (today, range) = tokio::try_join!(
            get_json::<PredictionsResponse>(&self.client, &today_url),
            get_json::<PredictionsResponse>(&self.client, &range_url),
        )?;

        Ok(vec![
            RegionUpdate::new("tides", today_content(&today.predictions)?),
            RegionUpdate::new("lowest-tide", lowest_content(&range.predictions)?),
        ])
    }
}

/// Render today's low tide list. An empty provider response and a
/// response whose low entries are all filtered out read differently.
fn today_content(predictions: &[Prediction]) -> Result<RegionContent, WidgetError> {
    if predictions.is_empty() {
        return Ok(RegionContent::text("No tide data available for today."));
    }

    let lows = low_tides(predictions)?;
    if lows.is_empty() {
        return Ok(RegionContent::text("No low tides remaining today."));
    }

    Ok(RegionContent::Tides {
        tides: lows
            .iter()
            .map(|low| TideEntry {
                time: short_time(low.time.time()),
                height: format!("{:.1} ft", low.height),
            })
            .collect(),
    })
}

/// Render the lowest daylight low over the lookahead range.
fn lowest_content(predictions: &[Prediction]) -> Result<RegionContent, WidgetError> {
    let lows = low_tides(predictions)?;

    Ok(match lowest_daylight_low(&lows) {
        Some(low) => RegionContent::LowestTide {
            date: short_date(low.time.date()),
            time: short_time(low.time.time()),
            height: format!("{:.1} ft", low.height),
        },
        None => RegionContent::text("No daylight low tides found."),
    })
}

/// Parse and filter predictions down to low tide events.
fn low_tides(predictions: &[Prediction]) -> Result<Vec<LowTide>, WidgetError> {
    predictions
        .iter()
        .filter(|p| p.kind == "L")
        .map(|p| {
            let time = NaiveDateTime::parse_from_str(&p.t, "%Y-%m-%d %H:%M")
                .map_err(|e| WidgetError::Parse(format!("tide time {:?}: {}", p.t, e)))?;
            let height: f64 = p
                .v
                .parse()
                .map_err(|_| WidgetError::Parse(format!("tide height {:?}", p.v)))?;
            Ok(LowTide { time, height })
        })
        .collect()
}

/// Lowest low tide whose local hour falls in the daylight window.
fn lowest_daylight_low(lows: &[LowTide]) -> Option<&LowTide> {
    lows.iter()
        .filter(|low| DAYLIGHT_HOURS.contains(&low.time.hour()))
        .min_by(|a, b| a.height.total_cmp(&b.height))
}
