//! Clock Widget
//!
//! Ticks every second, re-rendering the greeting, date and time lines
//! from the local wall clock. Pure computation, no fallback path in
//! practice.

use super::Widget;
use crate::board::{Board, RegionContent, RegionUpdate};
use crate::clock::{date_line, greeting_for, time_line};
use crate::widgets::WidgetError;
use async_trait::async_trait;
use chrono::Local;
use std::time::Duration;

pub struct ClockWidget;

#[async_trait]
impl Widget for ClockWidget {
    fn name(&self) -> &'static str {
        "clock"
    }

    fn primary_region(&self) -> &'static str {
        "clock"
    }

    fn refresh_interval(&self) -> Option<Duration> {
        Some(Duration::from_secs(1))
    }

    fn fallback(&self) -> &'static str {
        "Clock unavailable."
    }

    async fn refresh(&self, _board: &Board) -> Result<Vec<RegionUpdate>, WidgetError> {
        let now = Local::now().naive_local();

        Ok(vec![RegionUpdate::new(
            "clock",
            RegionContent::Clock {
                greeting: greeting_for(now).to_string(),
                date: date_line(now),
                time: time_line(now),
            },
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn emits_the_three_clock_lines() {
        let board = Board::new("floral");
        let updates = ClockWidget.refresh(&board).await.unwrap();

        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].region, "clock");
        match &updates[0].content {
            RegionContent::Clock {
                greeting,
                date,
                time,
            } => {
                assert!(greeting.starts_with("Good "));
                assert_eq!(date, &date.to_uppercase());
                assert_eq!(time.len(), 8);
            }
            other => panic!("unexpected content: {:?}", other),
        }
    }
}
