//! On This Day Widget
//!
//! Fetches the historical events listed for today's month/day and shows
//! one of them picked uniformly at random, with a link to the first
//! related article when the provider names one.

use super::{get_json, Widget, WidgetError};
use crate::board::{Board, RegionContent, RegionUpdate};
use async_trait::async_trait;
use chrono::{Datelike, Local};
use rand::Rng;
use serde::Deserialize;

const BASE_URL: &str = "https://api.wikimedia.org/feed/v1/wikipedia/en/onthisday/events";

const ARTICLE_BASE: &str = "https://en.wikipedia.org/wiki";

pub struct HistoryWidget {
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct OnThisDay {
    #[serde(default)]
    events: Vec<HistoryEvent>,
}

#[derive(Debug, Deserialize)]
struct HistoryEvent {
    year: i32,
    text: String,
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    titles: Titles,
}

#[derive(Debug, Deserialize)]
struct Titles {
    normalized: String,
}

impl HistoryWidget {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Widget for HistoryWidget {
    fn name(&self) -> &'static str {
        "history"
    }

    fn primary_region(&self) -> &'static str {
        "history"
    }

    fn fallback(&self) -> &'static str {
        "Unable to load history fact."
    }

    async fn refresh(&self, _board: &Board) -> Result<Vec<RegionUpdate>, WidgetError> {
        let today = Local::now().date_naive();
        let (month, day) = (today.month(), today.day());

        let url = format!("{}/{}/{}", BASE_URL, month, day);
        let response: OnThisDay = get_json(&self.client, &url).await?;

        let content = if response.events.is_empty() {
            RegionContent::text("No historical events found.")
        } else {
            let pick = rand::thread_rng().gen_range(0..response.events.len());
            let event = &response.events[pick];
            RegionContent::Fact {
                year: event.year,
                text: event.text.clone(),
                link: article_link(event, month, day),
            }
        };

        Ok(vec![RegionUpdate::new("history", content)])
    }
}

/// Article link for an event: the URL-encoded normalized title of its
/// first page, or the generic month/day page when none is listed.
fn article_link(event: &HistoryEvent, month: u32, day: u32) -> String {
    match event.pages.first() {
        Some(page) => format!(
            "{}/{}",
            ARTICLE_BASE,
            urlencoding::encode(&page.titles.normalized)
        ),
        None => format!("{}/{}_{}", ARTICLE_BASE, month, day),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_uses_encoded_normalized_title() {
        let event = HistoryEvent {
            year: 1969,
            text: "Apollo 12 lands on the Moon.".to_string(),
            pages: vec![Page {
                titles: Titles {
                    normalized: "Apollo 12".to_string(),
                },
            }],
        };

        assert_eq!(
            article_link(&event, 11, 19),
            "https://en.wikipedia.org/wiki/Apollo%2012"
        );
    }

    #[test]
    fn link_falls_back_to_the_date_page() {
        let event = HistoryEvent {
            year: 1863,
            text: "An event with no pages.".to_string(),
            pages: vec![],
        };

        assert_eq!(article_link(&event, 11, 19), "https://en.wikipedia.org/wiki/11_19");
    }

    #[test]
    fn payload_parses_with_and_without_pages() {
        let raw = r#"{
            "events": [
                {"year": 1969, "text": "Apollo 12 lands.", "pages": [{"titles": {"normalized": "Apollo 12"}}]},
                {"year": 1863, "text": "Gettysburg Address."}
            ]
        }"#;

        let parsed: OnThisDay = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.events.len(), 2);
        assert_eq!(parsed.events[0].year, 1969);
        assert!(parsed.events[1].pages.is_empty());
    }

    #[test]
    fn empty_feed_parses_to_no_events() {
        let parsed: OnThisDay = serde_json::from_str("{}").unwrap();
        assert!(parsed.events.is_empty());
    }
}
