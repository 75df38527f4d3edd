//! Region Content Types
//!
//! Structured payloads widgets write into board regions. The external view
//! layer decides how each kind is laid out; formatting that the dashboard
//! contract fixes (times, heights, labels) is already applied here.

use serde::{Deserialize, Serialize};

/// One update a widget produced for a named region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionUpdate {
    pub region: String,
    pub content: RegionContent,
}

impl RegionUpdate {
    pub fn new(region: impl Into<String>, content: RegionContent) -> Self {
        Self {
            region: region.into(),
            content,
        }
    }
}

/// Content of a render target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegionContent {
    /// Plain one-line text, also used for fallback and "nothing to show"
    /// messages
    Text { text: String },
    /// Greeting, date and clock strings
    Clock {
        greeting: String,
        date: String,
        time: String,
    },
    /// Today's low tides
    Tides { tides: Vec<TideEntry> },
    /// Lowest daylight low tide over the lookahead range
    LowestTide {
        date: String,
        time: String,
        height: String,
    },
    /// Current weather conditions
    Weather {
        icon: String,
        description: String,
        temperature: i64,
        feels_like: i64,
        humidity: i64,
        wind_speed: i64,
    },
    /// Moon phase name and illumination split
    Moon {
        name: String,
        illumination: f64,
        waxing: bool,
    },
    /// Sun indicator along the daylight arc; inactive until sun times
    /// are known
    SunArc {
        active: bool,
        percentage: f64,
        x: f64,
        y: f64,
        is_daylight: bool,
    },
    /// Game schedule entries
    Games { games: Vec<GameLine> },
    /// Historical event of the day
    Fact {
        year: i32,
        text: String,
        link: String,
    },
    /// Quote with attribution
    Quote { text: String, author: String },
    /// Currency-formatted value with a caption
    Money { amount: String, caption: String },
}

impl RegionContent {
    pub fn text(text: impl Into<String>) -> Self {
        RegionContent::Text { text: text.into() }
    }
}

/// One low tide line: formatted local time and height
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TideEntry {
    pub time: String,
    pub height: String,
}

/// One schedule line for the games region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameLine {
    /// Display label, e.g. "Next Seahawks Game" or "Thursday Football"
    pub label: String,
    /// Short matchup, e.g. "DAL @ SEA"
    pub matchup: String,
    /// Kickoff time for upcoming games, score line for live/final ones
    pub detail: String,
    /// True while the game is in progress (view shows a live indicator)
    pub live: bool,
}
