//! House Value Widget
//!
//! No network call: after a short artificial delay it renders the
//! configured estimate, currency-formatted with no cents.

use super::{Widget, WidgetError};
use crate::board::{Board, RegionContent, RegionUpdate};
use crate::config::HouseConfig;
use async_trait::async_trait;
use std::time::Duration;

/// Matches the reference dashboard's simulated load time
const ARTIFICIAL_DELAY: Duration = Duration::from_millis(500);

pub struct HouseWidget {
    value: u64,
}

impl HouseWidget {
    pub fn new(config: &HouseConfig) -> Self {
        Self {
            value: config.value,
        }
    }
}

#[async_trait]
impl Widget for HouseWidget {
    fn name(&self) -> &'static str {
        "house"
    }

    fn primary_region(&self) -> &'static str {
        "house-value"
    }

    fn fallback(&self) -> &'static str {
        "House value unavailable."
    }

    async fn refresh(&self, _board: &Board) -> Result<Vec<RegionUpdate>, WidgetError> {
        tokio::time::sleep(ARTIFICIAL_DELAY).await;

        Ok(vec![RegionUpdate::new(
            "house-value",
            RegionContent::Money {
                amount: format_usd(self.value),
                caption: "Estimated Value".to_string(),
            },
        )])
    }
}

/// Whole-dollar USD format with thousands separators, e.g. `$1,303,356`
pub fn format_usd(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("${}", grouped)
}
