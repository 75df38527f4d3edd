//! Local Astronomy
//!
//! Pure calculations with no I/O:
//! - [`moon`]: moon phase name and illumination from a date
//! - [`sun`]: sun position along the daylight arc from sunrise/sunset times

pub mod moon;
pub mod sun;

pub use moon::{moon_phase, MoonPhase, PhaseName};
pub use sun::{sun_position, SunPosition, SunTimes};
