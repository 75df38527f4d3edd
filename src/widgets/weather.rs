//! Weather Widget
//!
//! Fetches current conditions from open-meteo every ten minutes. Numeric
//! weather codes map onto a fixed icon/description table; codes the table
//! does not know render as "Unknown" rather than failing.

use super::{get_json, Widget, WidgetError};
use crate::board::{Board, RegionContent, RegionUpdate};
use crate::config::LocationConfig;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

const BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";

const REFRESH_INTERVAL: Duration = Duration::from_secs(600);

pub struct WeatherWidget {
    client: reqwest::Client,
    latitude: f64,
    longitude: f64,
    timezone: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<CurrentConditions>,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temperature_2m: f64,
    apparent_temperature: f64,
    relative_humidity_2m: f64,
    wind_speed_10m: f64,
    weather_code: u32,
}

impl WeatherWidget {
    pub fn new(client: reqwest::Client, location: &LocationConfig) -> Self {
        Self {
            client,
            latitude: location.latitude,
            longitude: location.longitude,
            timezone: location.timezone.clone(),
        }
    }

    fn url(&self) -> String {
        format!(
            "{}?latitude={}&longitude={}\
             &current=temperature_2m,relative_humidity_2m,apparent_temperature,precipitation,weather_code,wind_speed_10m\
             &temperature_unit=fahrenheit&wind_speed_unit=mph&timezone={}",
            BASE_URL,
            self.latitude,
            self.longitude,
            urlencoding::encode(&self.timezone)
        )
    }
}

#[async_trait]
impl Widget for WeatherWidget {
    fn name(&self) -> &'static str {
        "weather"
    }

    fn primary_region(&self) -> &'static str {
        "weather"
    }

    fn refresh_interval(&self) -> Option<Duration> {
        Some(REFRESH_INTERVAL)
    }

    fn fallback(&self) -> &'static str {
        "Weather unavailable"
    }

    async fn refresh(&self, _board: &Board) -> Result<Vec<RegionUpdate>, WidgetError> {
        let response: ForecastResponse = get_json(&self.client, &self.url()).await?;
        let current = response
            .current
            .ok_or(WidgetError::MissingField("current"))?;

        let (icon, description) = weather_info(current.weather_code);

        Ok(vec![RegionUpdate::new(
            "weather",
            RegionContent::Weather {
                icon: icon.to_string(),
                description: description.to_string(),
                temperature: current.temperature_2m.round() as i64,
                feels_like: current.apparent_temperature.round() as i64,
                humidity: current.relative_humidity_2m.round() as i64,
                wind_speed: current.wind_speed_10m.round() as i64,
            },
        )])
    }
}

/// Map an open-meteo weather code to an icon and description.
/// Unknown codes get the generic entry, never an error.
pub fn weather_info(code: u32) -> (&'static str, &'static str) {
    match code {
        0 => ("☀️", "Clear"),
        1 => ("🌤️", "Mostly Clear"),
        2 => ("⛅", "Partly Cloudy"),
        3 => ("☁️", "Overcast"),
        45 | 48 => ("🌫️", "Foggy"),
        51 => ("🌦️", "Light Drizzle"),
        53 => ("🌦️", "Drizzle"),
        55 => ("🌦️", "Heavy Drizzle"),
        61 => ("🌧️", "Light Rain"),
        63 => ("🌧️", "Rain"),
        65 => ("🌧️", "Heavy Rain"),
        71 => ("🌨️", "Light Snow"),
        73 => ("🌨️", "Snow"),
        75 => ("🌨️", "Heavy Snow"),
        77 => ("🌨️", "Snow Grains"),
        80 => ("🌦️", "Light Showers"),
        81 => ("🌦️", "Showers"),
        82 => ("🌦️", "Heavy Showers"),
        85 => ("🌨️", "Light Snow Showers"),
        86 => ("🌨️", "Snow Showers"),
        95 => ("⛈️", "Thunderstorm"),
        96 | 99 => ("⛈️", "Thunderstorm + Hail"),
        _ => ("🌡️", "Unknown"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_descriptions() {
        assert_eq!(weather_info(0).1, "Clear");
        assert_eq!(weather_info(61).1, "Light Rain");
        assert_eq!(weather_info(95).1, "Thunderstorm");
    }

    #[test]
    fn unknown_code_maps_to_generic_entry() {
        assert_eq!(weather_info(12).1, "Unknown");
        assert_eq!(weather_info(1000).1, "Unknown");
    }

    #[test]
    fn current_conditions_parse_and_round() {
        let raw = r#"{
            "current": {
                "temperature_2m": 46.6,
                "apparent_temperature": 42.4,
                "relative_humidity_2m": 87.0,
                "wind_speed_10m": 7.8,
                "weather_code": 61
            }
        }"#;

        let parsed: ForecastResponse = serde_json::from_str(raw).unwrap();
        let current = parsed.current.unwrap();
        assert_eq!(current.temperature_2m.round() as i64, 47);
        assert_eq!(current.apparent_temperature.round() as i64, 42);
        assert_eq!(current.wind_speed_10m.round() as i64, 8);
        assert_eq!(current.weather_code, 61);
    }

    #[test]
    fn missing_current_block_is_detectable() {
        let parsed: ForecastResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.current.is_none());
    }

    #[test]
    fn url_includes_requested_fields_and_units() {
        let widget = WeatherWidget::new(
            reqwest::Client::new(),
            &crate::config::LocationConfig::default(),
        );
        let url = widget.url();
        assert!(url.contains("temperature_unit=fahrenheit"));
        assert!(url.contains("wind_speed_unit=mph"));
        assert!(url.contains("timezone=America%2FLos_Angeles"));
        assert!(url.contains("weather_code"));
    }
}
