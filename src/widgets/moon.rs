//! Moon Phase Widget
//!
//! Fully local: computes the phase from the wall clock at bootstrap and
//! renders it once. No network, so the fallback should never appear.

use super::{Widget, WidgetError};
use crate::astro::moon_phase;
use crate::board::{Board, RegionContent, RegionUpdate};
use async_trait::async_trait;
use chrono::Local;

pub struct MoonWidget;

#[async_trait]
impl Widget for MoonWidget {
    fn name(&self) -> &'static str {
        "moon"
    }

    fn primary_region(&self) -> &'static str {
        "moon"
    }

    fn fallback(&self) -> &'static str {
        "Moon phase unavailable."
    }

    async fn refresh(&self, _board: &Board) -> Result<Vec<RegionUpdate>, WidgetError> {
        let phase = moon_phase(Local::now().naive_local());

        Ok(vec![RegionUpdate::new(
            "moon",
            RegionContent::Moon {
                name: phase.name.as_str().to_string(),
                illumination: phase.illumination,
                waxing: phase.waxing,
            },
        )])
    }
}
