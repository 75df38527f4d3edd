//! Dad Joke Widget
//!
//! Fetches one random joke at bootstrap. The provider only answers JSON
//! when asked via the Accept header. Any failure shows the fixed
//! fallback joke.

use super::{Widget, WidgetError};
use crate::board::{Board, RegionContent, RegionUpdate};
use async_trait::async_trait;
use serde::Deserialize;

const JOKE_URL: &str = "https://icanhazdadjoke.com/";

const FALLBACK: &str = "Why don't scientists trust atoms? Because they make up everything!";

pub struct JokeWidget {
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct JokeResponse {
    joke: String,
}

impl JokeWidget {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Widget for JokeWidget {
    fn name(&self) -> &'static str {
        "joke"
    }

    fn primary_region(&self) -> &'static str {
        "joke"
    }

    fn fallback(&self) -> &'static str {
        FALLBACK
    }

    async fn refresh(&self, _board: &Board) -> Result<Vec<RegionUpdate>, WidgetError> {
        let response = self
            .client
            .get(JOKE_URL)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(WidgetError::Status(response.status()));
        }

        let joke: JokeResponse = response
            .json()
            .await
            .map_err(|e| WidgetError::Parse(e.to_string()))?;

        Ok(vec![RegionUpdate::new(
            "joke",
            RegionContent::text(joke.joke),
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_parses() {
        let raw = r#"{"id": "R7UfaahVfFd", "joke": "What do you call a fish with no eyes? A fsh.", "status": 200}"#;
        let parsed: JokeResponse = serde_json::from_str(raw).unwrap();
        assert!(parsed.joke.starts_with("What do you call"));
    }
}
