//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! One TOML file describes a deployment: which widgets are enabled, the
//! location and team the data widgets are keyed to, and the theme set.
//! The two dashboard variants are two config files of the same binary.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub location: LocationConfig,

    #[serde(default)]
    pub sports: SportsConfig,

    #[serde(default)]
    pub house: HouseConfig,

    #[serde(default)]
    pub widgets: WidgetsConfig,

    #[serde(default)]
    pub theme: ThemeConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8091
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Location the tide, sun and weather widgets are keyed to
#[derive(Debug, Clone, Deserialize)]
pub struct LocationConfig {
    #[serde(default = "default_latitude")]
    pub latitude: f64,

    #[serde(default = "default_longitude")]
    pub longitude: f64,

    #[serde(default = "default_timezone")]
    pub timezone: String,

    #[serde(default = "default_tide_station")]
    pub tide_station: String,
}

fn default_latitude() -> f64 {
    47.401
}

fn default_longitude() -> f64 {
    -122.324
}

fn default_timezone() -> String {
    "America/Los_Angeles".to_string()
}

fn default_tide_station() -> String {
    // Des Moines, WA (East Passage)
    "9446248".to_string()
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
            timezone: default_timezone(),
            tide_station: default_tide_station(),
        }
    }
}

/// Tracked team for the sports widget
#[derive(Debug, Clone, Deserialize)]
pub struct SportsConfig {
    #[serde(default = "default_team_abbreviation")]
    pub team_abbreviation: String,

    #[serde(default = "default_team_label")]
    pub team_label: String,
}

fn default_team_abbreviation() -> String {
    "SEA".to_string()
}

fn default_team_label() -> String {
    "Seahawks".to_string()
}

impl Default for SportsConfig {
    fn default() -> Self {
        Self {
            team_abbreviation: default_team_abbreviation(),
            team_label: default_team_label(),
        }
    }
}

/// Static house value widget
#[derive(Debug, Clone, Deserialize)]
pub struct HouseConfig {
    #[serde(default = "default_house_value")]
    pub value: u64,
}

fn default_house_value() -> u64 {
    1_303_356
}

impl Default for HouseConfig {
    fn default() -> Self {
        Self {
            value: default_house_value(),
        }
    }
}

/// Which widgets a deployment enables
#[derive(Debug, Clone, Deserialize)]
pub struct WidgetsConfig {
    #[serde(default = "enabled")]
    pub clock: bool,
    #[serde(default = "enabled")]
    pub sun: bool,
    #[serde(default = "enabled")]
    pub moon: bool,
    #[serde(default = "enabled")]
    pub weather: bool,
    #[serde(default = "enabled")]
    pub tides: bool,
    #[serde(default = "enabled")]
    pub sports: bool,
    #[serde(default = "enabled")]
    pub history: bool,
    #[serde(default = "enabled")]
    pub quote: bool,
    #[serde(default = "enabled")]
    pub joke: bool,
    #[serde(default = "enabled")]
    pub house: bool,
}

fn enabled() -> bool {
    true
}

impl Default for WidgetsConfig {
    fn default() -> Self {
        Self {
            clock: true,
            sun: true,
            moon: true,
            weather: true,
            tides: true,
            sports: true,
            history: true,
            quote: true,
            joke: true,
            house: true,
        }
    }
}

/// Theme defaults and persistence
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeConfig {
    #[serde(default = "default_theme")]
    pub default: String,

    #[serde(default = "default_available_themes")]
    pub available: Vec<String>,

    /// Override for the theme persistence file; defaults to the user
    /// data dir
    pub store_path: Option<String>,
}

fn default_theme() -> String {
    "floral".to_string()
}

fn default_available_themes() -> Vec<String> {
    vec![
        "floral".to_string(),
        "ocean".to_string(),
        "sunset".to_string(),
        "midnight".to_string(),
    ]
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default: default_theme(),
            available: default_available_themes(),
            store_path: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations, or fall back to defaults with
    /// environment overrides
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("daydash").join("config.toml")),
            Some(PathBuf::from("/etc/daydash/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("DAYDASH_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("DAYDASH_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        if let Ok(station) = std::env::var("DAYDASH_TIDE_STATION") {
            self.location.tide_station = station;
        }
        if let Ok(team) = std::env::var("DAYDASH_TEAM") {
            self.sports.team_abbreviation = team;
        }
        if let Ok(theme) = std::env::var("DAYDASH_THEME") {
            self.theme.default = theme;
        }

        if let Ok(level) = std::env::var("DAYDASH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("DAYDASH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Daydash Configuration
#
# One file describes one dashboard deployment: enable the widgets that
# deployment shows and pick its theme default. Environment variables
# override these settings:
# - DAYDASH_HOST
# - DAYDASH_PORT
# - DAYDASH_TIDE_STATION
# - DAYDASH_TEAM
# - DAYDASH_THEME
# - DAYDASH_LOG_LEVEL
# - DAYDASH_LOG_FORMAT

[server]
host = "0.0.0.0"
port = 8091

[location]
# Coordinates for the sun and weather widgets
latitude = 47.401
longitude = -122.324

# IANA timezone passed to the weather provider
timezone = "America/Los_Angeles"

# NOAA tide prediction station
tide_station = "9446248"

[sports]
# Team the schedule widget tracks
team_abbreviation = "SEA"
team_label = "Seahawks"

[house]
# Static estimated value shown by the house widget
value = 1303356

# Enable/disable widgets per deployment. Example pairs:
#   hall dashboard:  tides, house, history, sun, sports, clock
#   desk dashboard:  quote, joke, sun, moon, weather, clock
[widgets]
clock = true
sun = true
moon = true
weather = true
tides = true
sports = true
history = true
quote = true
joke = true
house = true

[theme]
# Applied when nothing has been persisted yet
default = "floral"
available = ["floral", "ocean", "sunset", "midnight"]

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_reference_deployment() {
        let config = Config::default();
        assert_eq!(config.location.tide_station, "9446248");
        assert_eq!(config.sports.team_abbreviation, "SEA");
        assert_eq!(config.theme.default, "floral");
        assert!(config.widgets.tides);
    }

    #[test]
    fn generated_sample_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.server.port, 8091);
        assert_eq!(config.house.value, 1_303_356);
        assert_eq!(config.theme.available.len(), 4);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [widgets]
            tides = false
            sports = false

            [theme]
            default = "midnight"
            "#,
        )
        .unwrap();

        assert!(!config.widgets.tides);
        assert!(!config.widgets.sports);
        assert!(config.widgets.quote);
        assert_eq!(config.theme.default, "midnight");
        assert_eq!(config.location.latitude, 47.401);
    }

    #[test]
    fn addr_joins_host_and_port() {
        let config = ServerConfig {
            host: "127.0.0.1".into(),
            port: 9000,
        };
        assert_eq!(config.addr(), "127.0.0.1:9000");
    }
}
