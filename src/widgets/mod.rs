//! Dashboard Widgets
//!
//! One module per data source. Every widget has the same shape: fetch (or
//! compute), transform, and emit updates for its render targets. Fetch
//! failures never propagate past the scheduler boundary; they become the
//! widget's fallback message in its primary region.

mod clock;
mod history;
mod house;
mod joke;
mod moon;
mod quote;
mod sports;
mod sun;
mod tides;
mod weather;

pub use clock::ClockWidget;
pub use history::HistoryWidget;
pub use house::HouseWidget;
pub use joke::JokeWidget;
pub use moon::MoonWidget;
pub use quote::QuoteWidget;
pub use sports::SportsWidget;
pub use sun::{SunArcWidget, SunTimesWidget};
pub use tides::TidesWidget;
pub use weather::WeatherWidget;

use crate::board::{Board, RegionUpdate};
use crate::config::Config;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Common trait for all widgets
#[async_trait]
pub trait Widget: Send + Sync {
    /// Unique name for this widget
    fn name(&self) -> &'static str;

    /// The render target the fallback message goes to
    fn primary_region(&self) -> &'static str;

    /// Periodic refresh interval; None means one load at bootstrap only
    fn refresh_interval(&self) -> Option<Duration> {
        None
    }

    /// One-line message shown when a refresh fails
    fn fallback(&self) -> &'static str;

    /// Fetch and transform, producing updates for this widget's regions.
    /// An empty result set is not an error; widgets emit their own
    /// "nothing to show" content for that case.
    async fn refresh(&self, board: &Board) -> Result<Vec<RegionUpdate>, WidgetError>;
}

/// Errors a widget refresh can hit. All of these degrade to the widget's
/// fallback message; none are fatal.
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed payload: {0}")]
    Parse(String),

    #[error("missing field: {0}")]
    MissingField(&'static str),
}

/// GET a JSON document, mapping transport, status and decode failures
/// onto the widget error taxonomy.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, WidgetError> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(WidgetError::Status(response.status()));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| WidgetError::Parse(e.to_string()))
}

/// Short clock time, e.g. `9:14 AM`
pub(crate) fn short_time(t: chrono::NaiveTime) -> String {
    t.format("%-I:%M %p").to_string()
}

/// Short date, e.g. `Sat, Nov 29`
pub(crate) fn short_date(d: chrono::NaiveDate) -> String {
    d.format("%a, %b %-d").to_string()
}

/// Build the widget registry for one deployment.
pub fn build_registry(config: &Config, client: &reqwest::Client) -> Vec<Arc<dyn Widget>> {
    let mut widgets: Vec<Arc<dyn Widget>> = Vec::new();

    if config.widgets.clock {
        widgets.push(Arc::new(ClockWidget));
    }
    if config.widgets.sun {
        widgets.push(Arc::new(SunTimesWidget::new(client.clone(), &config.location)));
        widgets.push(Arc::new(SunArcWidget));
    }
    if config.widgets.moon {
        widgets.push(Arc::new(MoonWidget));
    }
    if config.widgets.weather {
        widgets.push(Arc::new(WeatherWidget::new(client.clone(), &config.location)));
    }
    if config.widgets.tides {
        widgets.push(Arc::new(TidesWidget::new(client.clone(), &config.location)));
    }
    if config.widgets.sports {
        widgets.push(Arc::new(SportsWidget::new(client.clone(), &config.sports)));
    }
    if config.widgets.history {
        widgets.push(Arc::new(HistoryWidget::new(client.clone())));
    }
    if config.widgets.quote {
        widgets.push(Arc::new(QuoteWidget::new(client.clone())));
    }
    if config.widgets.joke {
        widgets.push(Arc::new(JokeWidget::new(client.clone())));
    }
    if config.widgets.house {
        widgets.push(Arc::new(HouseWidget::new(&config.house)));
    }

    widgets
}
