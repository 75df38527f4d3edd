//! Moon Phase Calculator
//!
//! Approximates the current moon phase from the elapsed time since a
//! reference new moon, classified into the eight traditional phase names
//! with a piecewise-linear illumination value.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Average period between successive new moons, in days.
pub const SYNODIC_MONTH: f64 = 29.530_588_67;

/// The eight named moon phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseName {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl PhaseName {
    /// Human-readable phase name
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseName::NewMoon => "New Moon",
            PhaseName::WaxingCrescent => "Waxing Crescent",
            PhaseName::FirstQuarter => "First Quarter",
            PhaseName::WaxingGibbous => "Waxing Gibbous",
            PhaseName::FullMoon => "Full Moon",
            PhaseName::WaningGibbous => "Waning Gibbous",
            PhaseName::LastQuarter => "Last Quarter",
            PhaseName::WaningCrescent => "Waning Crescent",
        }
    }
}

impl std::fmt::Display for PhaseName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Computed moon phase for one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoonPhase {
    /// Position in the synodic cycle, in [0, 1)
    pub phase: f64,
    /// Named phase bin
    pub name: PhaseName,
    /// Illuminated fraction, in [0, 1]
    pub illumination: f64,
    /// True during the waxing half of the cycle (phase < 0.5).
    /// Drives the view's left/right illumination split.
    pub waxing: bool,
}

/// Reference new moon: 2000-01-06 18:14, taken in the same local civil
/// representation as `now` (no UTC conversion on either side).
fn reference_new_moon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2000, 1, 6)
        .and_then(|d| d.and_hms_opt(18, 14, 0))
        .expect("valid reference date")
}

/// Compute the moon phase for a local civil instant.
pub fn moon_phase(now: NaiveDateTime) -> MoonPhase {
    let days = (now - reference_new_moon()).num_seconds() as f64 / 86_400.0;
    let phase = days.rem_euclid(SYNODIC_MONTH) / SYNODIC_MONTH;
    let (name, illumination) = classify(phase);

    MoonPhase {
        phase,
        name,
        illumination,
        waxing: phase < 0.5,
    }
}

/// Classify a cycle position into a named bin and its illumination.
///
/// Bin boundaries sit at k/16 + 1/32 for k = 0..7, wrapping back to
/// New Moon at both ends of the cycle.
fn classify(phase: f64) -> (PhaseName, f64) {
    if phase < 0.0625 {
        (PhaseName::NewMoon, 0.0)
    } else if phase < 0.1875 {
        (PhaseName::WaxingCrescent, phase * 2.0)
    } else if phase < 0.3125 {
        (PhaseName::FirstQuarter, 0.5)
    } else if phase < 0.4375 {
        (PhaseName::WaxingGibbous, 0.5 + (phase - 0.25) * 2.0)
    } else if phase < 0.5625 {
        (PhaseName::FullMoon, 1.0)
    } else if phase < 0.6875 {
        (PhaseName::WaningGibbous, 1.0 - (phase - 0.5) * 2.0)
    } else if phase < 0.8125 {
        (PhaseName::LastQuarter, 0.5)
    } else if phase < 0.9375 {
        (PhaseName::WaningCrescent, 0.5 - (phase - 0.75) * 2.0)
    } else {
        (PhaseName::NewMoon, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_instant_is_new_moon() {
        let phase = moon_phase(reference_new_moon());
        assert_eq!(phase.name, PhaseName::NewMoon);
        assert_eq!(phase.illumination, 0.0);
        assert!(phase.phase < 1e-9);
        assert!(phase.waxing);
    }

    #[test]
    fn illumination_stays_in_unit_range() {
        let mut p = 0.0;
        while p < 1.0 {
            let (_, illum) = classify(p);
            assert!((0.0..=1.0).contains(&illum), "phase {} -> {}", p, illum);
            p += 0.0005;
        }
    }

    #[test]
    fn quarter_bins_are_half_lit() {
        assert_eq!(classify(0.25), (PhaseName::FirstQuarter, 0.5));
        assert_eq!(classify(0.75), (PhaseName::LastQuarter, 0.5));
    }

    #[test]
    fn full_moon_is_fully_lit() {
        let (name, illum) = classify(0.5);
        assert_eq!(name, PhaseName::FullMoon);
        assert_eq!(illum, 1.0);
    }

    #[test]
    fn crescent_and_gibbous_are_linear_in_phase() {
        let (name, illum) = classify(0.1);
        assert_eq!(name, PhaseName::WaxingCrescent);
        assert!((illum - 0.2).abs() < 1e-12);

        let (name, illum) = classify(0.35);
        assert_eq!(name, PhaseName::WaxingGibbous);
        assert!((illum - 0.7).abs() < 1e-12);

        let (name, illum) = classify(0.6);
        assert_eq!(name, PhaseName::WaningGibbous);
        assert!((illum - 0.8).abs() < 1e-12);

        let (name, illum) = classify(0.9);
        assert_eq!(name, PhaseName::WaningCrescent);
        assert!((illum - 0.2).abs() < 1e-12);
    }

    #[test]
    fn cycle_wraps_back_to_new_moon() {
        assert_eq!(classify(0.95).0, PhaseName::NewMoon);
        assert_eq!(classify(0.999).0, PhaseName::NewMoon);
        assert_eq!(classify(0.0).0, PhaseName::NewMoon);
    }

    #[test]
    fn waxing_flag_follows_half_cycle() {
        // Roughly one week after the reference new moon the moon is waxing,
        // roughly three weeks after it is waning.
        let waxing = moon_phase(reference_new_moon() + chrono::Duration::days(7));
        assert!(waxing.waxing);

        let waning = moon_phase(reference_new_moon() + chrono::Duration::days(21));
        assert!(!waning.waxing);
    }

    #[test]
    fn instants_before_reference_still_classify() {
        let phase = moon_phase(reference_new_moon() - chrono::Duration::days(3));
        assert!((0.0..1.0).contains(&phase.phase));
        assert!((0.0..=1.0).contains(&phase.illumination));
    }
}
