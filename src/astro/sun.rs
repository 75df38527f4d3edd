//! Sun Position Mapper
//!
//! Maps the current instant onto a semicircular daylight arc between
//! sunrise and sunset. The view layer owns the arc's radius and center;
//! this module only produces the unit-circle point and daylight flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sunrise and sunset for the configured location.
///
/// Both fields are always set together from a single provider response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunTimes {
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}

/// Position of the sun indicator along the daylight arc
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SunPosition {
    /// Fraction of daylight elapsed, clamped to [0, 1]
    pub percentage: f64,
    /// Arc angle in radians: pi at sunrise, 0 at sunset
    pub angle: f64,
    /// Unit-circle x offset from the arc center
    pub x: f64,
    /// Unit-circle y offset from the arc center (negative above center)
    pub y: f64,
    /// Full visual prominence during daylight, reduced outside it
    pub is_daylight: bool,
}

/// Map an instant to a point on the daylight arc.
///
/// Exactly 0 before sunrise and exactly 1 after sunset; no extrapolation
/// past the endpoints.
pub fn sun_position(now: DateTime<Utc>, times: &SunTimes) -> SunPosition {
    let percentage = if now <= times.sunrise {
        0.0
    } else if now >= times.sunset {
        1.0
    } else {
        let total = (times.sunset - times.sunrise).num_milliseconds() as f64;
        let elapsed = (now - times.sunrise).num_milliseconds() as f64;
        (elapsed / total).clamp(0.0, 1.0)
    };

    let angle = std::f64::consts::PI * (1.0 - percentage);

    SunPosition {
        percentage,
        angle,
        x: angle.cos(),
        y: -angle.sin(),
        is_daylight: now >= times.sunrise && now <= times.sunset,
    }
}
