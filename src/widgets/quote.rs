//! Quote Widget
//!
//! Fetches one random quote at bootstrap. Any failure shows the fixed
//! fallback quote; the region is never left blank.

use super::{get_json, Widget, WidgetError};
use crate::board::{Board, RegionContent, RegionUpdate};
use async_trait::async_trait;
use serde::Deserialize;

const QUOTE_URL: &str = "https://api.quotable.io/random";

const FALLBACK: &str =
    "\"The only way to do great work is to love what you do.\" - Steve Jobs";

pub struct QuoteWidget {
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    content: String,
    author: String,
}

impl QuoteWidget {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Widget for QuoteWidget {
    fn name(&self) -> &'static str {
        "quote"
    }

    fn primary_region(&self) -> &'static str {
        "quote"
    }

    fn fallback(&self) -> &'static str {
        FALLBACK
    }

    async fn refresh(&self, _board: &Board) -> Result<Vec<RegionUpdate>, WidgetError> {
        let quote: QuoteResponse = get_json(&self.client, QUOTE_URL).await?;

        Ok(vec![RegionUpdate::new(
            "quote",
            RegionContent::Quote {
                text: quote.content,
                author: quote.author,
            },
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_parses() {
        let raw = r#"{"content": "Simplicity is the soul of efficiency.", "author": "Austin Freeman"}"#;
        let parsed: QuoteResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.author, "Austin Freeman");
    }

    #[test]
    fn payload_without_author_is_an_error() {
        let raw = r#"{"content": "..."}"#;
        assert!(serde_json::from_str::<QuoteResponse>(raw).is_err());
    }
}
