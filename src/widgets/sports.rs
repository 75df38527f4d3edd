//! Game Schedule Widget
//!
//! Fetches the league scoreboard and renders two things into one region:
//! the tracked team's game (labelled Next/Live/Last by status, with the
//! score shown once the game has started), and every other game kicking
//! off within the next 6.5 days on a weekday other than the league's
//! primary Sunday slate.

use super::{get_json, Widget, WidgetError};
use crate::board::{Board, GameLine, RegionContent, RegionUpdate};
use crate::config::SportsConfig;
use async_trait::async_trait;
use chrono::{DateTime, Datelike, Local, Utc, Weekday};
use serde::Deserialize;

const SCOREBOARD_URL: &str =
    "https://site.api.espn.com/apis/site/v2/sports/football/nfl/scoreboard";

/// Forward window for the non-Sunday schedule list: 6.5 days
const LOOKAHEAD_MINUTES: i64 = 9360;

pub struct SportsWidget {
    client: reqwest::Client,
    team: String,
    team_label: String,
}

#[derive(Debug, Deserialize)]
struct Scoreboard {
    #[serde(default)]
    events: Vec<Event>,
}

#[derive(Debug, Deserialize)]
struct Event {
    id: String,
    date: String,
    #[serde(rename = "shortName")]
    short_name: Option<String>,
    status: EventStatus,
    #[serde(default)]
    competitions: Vec<Competition>,
}

#[derive(Debug, Deserialize)]
struct EventStatus {
    #[serde(rename = "type")]
    kind: StatusType,
}

#[derive(Debug, Deserialize)]
struct StatusType {
    /// `pre`, `in` or `post`
    state: String,
}

#[derive(Debug, Deserialize)]
struct Competition {
    #[serde(default)]
    competitors: Vec<Competitor>,
}

#[derive(Debug, Deserialize)]
struct Competitor {
    #[serde(rename = "homeAway")]
    home_away: String,
    team: Team,
    score: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Team {
    abbreviation: String,
}

impl SportsWidget {
    pub fn new(client: reqwest::Client, config: &SportsConfig) -> Self {
        Self {
            client,
            team: config.team_abbreviation.clone(),
            team_label: config.team_label.clone(),
        }
    }
}

#[async_trait]
impl Widget for SportsWidget {
    fn name(&self) -> &'static str {
        "sports"
    }

    fn primary_region(&self) -> &'static str {
        "games"
    }

    fn fallback(&self) -> &'static str {
        "Unable to load game schedule."
    }

    async fn refresh(&self, _board: &Board) -> Result<Vec<RegionUpdate>, WidgetError> {
        let scoreboard: Scoreboard = get_json(&self.client, SCOREBOARD_URL).await?;
        let games = plan_games(&scoreboard.events, &self.team, &self.team_label, Utc::now())?;

        let content = if games.is_empty() {
            RegionContent::text(format!("No upcoming {} game found.", self.team_label))
        } else {
            RegionContent::Games { games }
        };

        Ok(vec![RegionUpdate::new("games", content)])
    }
}

/// Build the schedule lines: the tracked team's game first, then the
/// non-Sunday games inside the lookahead window sorted by kickoff.
fn plan_games(
    events: &[Event],
    team: &str,
    team_label: &str,
    now: DateTime<Utc>,
) -> Result<Vec<GameLine>, WidgetError> {
    let mut games = Vec::new();

    let tracked = events.iter().find(|e| has_team(e, team));
    if let Some(event) = tracked {
        games.push(tracked_line(event, team_label)?);
    }
    let tracked_id = tracked.map(|e| e.id.as_str());

    let limit = now + chrono::Duration::minutes(LOOKAHEAD_MINUTES);
    let mut upcoming: Vec<(DateTime<Utc>, &Event)> = Vec::new();

    for event in events {
        if Some(event.id.as_str()) == tracked_id || event.status.kind.state == "post" {
            continue;
        }
        let kickoff = parse_kickoff(&event.date)?;
        let local_day = kickoff.with_timezone(&Local).weekday();
        if kickoff >= now && kickoff <= limit && local_day != Weekday::Sun {
            upcoming.push((kickoff, event));
        }
    }

    upcoming.sort_by_key(|(kickoff, _)| *kickoff);

    for (kickoff, event) in upcoming {
        let day_name = kickoff.with_timezone(&Local).format("%A").to_string();
        games.push(GameLine {
            label: format!("{} Football", day_name),
            matchup: matchup(event)?,
            detail: kickoff_line(kickoff),
            live: false,
        });
    }

    Ok(games)
}

/// Line for the tracked team's game, labelled by status.
fn tracked_line(event: &Event, team_label: &str) -> Result<GameLine, WidgetError> {
    let state = event.status.kind.state.as_str();
    let prefix = match state {
        "in" => "Live",
        "post" => "Last",
        _ => "Next",
    };

    // Once the game has started the score replaces the kickoff time
    let detail = if state == "in" || state == "post" {
        score_line(event)?
    } else {
        kickoff_line(parse_kickoff(&event.date)?)
    };

    Ok(GameLine {
        label: format!("{} {} Game", prefix, team_label),
        matchup: matchup(event)?,
        detail,
        live: state == "in",
    })
}

fn has_team(event: &Event, abbreviation: &str) -> bool {
    event.competitions.iter().any(|c| {
        c.competitors
            .iter()
            .any(|comp| comp.team.abbreviation == abbreviation)
    })
}

/// Short matchup, preferring the provider's shortName
fn matchup(event: &Event) -> Result<String, WidgetError> {
    if let Some(short) = &event.short_name {
        return Ok(short.clone());
    }

    let competitors = &event
        .competitions
        .first()
        .ok_or(WidgetError::MissingField("competitions"))?
        .competitors;
    let away = side(competitors, "away")?;
    let home = side(competitors, "home")?;
    Ok(format!(
        "{} @ {}",
        away.team.abbreviation, home.team.abbreviation
    ))
}

/// Score line for a live or finished game, away side first
fn score_line(event: &Event) -> Result<String, WidgetError> {
    let competitors = &event
        .competitions
        .first()
        .ok_or(WidgetError::MissingField("competitions"))?
        .competitors;
    let away = side(competitors, "away")?;
    let home = side(competitors, "home")?;

    Ok(format!(
        "{} {} - {} {}",
        away.team.abbreviation,
        away.score.as_deref().unwrap_or("0"),
        home.team.abbreviation,
        home.score.as_deref().unwrap_or("0"),
    ))
}

fn side<'a>(competitors: &'a [Competitor], which: &str) -> Result<&'a Competitor, WidgetError> {
    competitors
        .iter()
        .find(|c| c.home_away == which)
        .ok_or(WidgetError::MissingField("competitors"))
}

/// Kickoff instants arrive either as full RFC 3339 or in the provider's
/// abbreviated `2025-11-30T18:00Z` form without seconds.
fn parse_kickoff(raw: &str) -> Result<DateTime<Utc>, WidgetError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%MZ")
        .map(|naive| naive.and_utc())
        .map_err(|e| WidgetError::Parse(format!("kickoff {:?}: {}", raw, e)))
}

/// Formatted local kickoff time, e.g. `Thu, Nov 27, 5:00 PM`
fn kickoff_line(kickoff: DateTime<Utc>) -> String {
    kickoff
        .with_timezone(&Local)
        .format("%a, %b %-d, %-I:%M %p")
        .to_string()
}
