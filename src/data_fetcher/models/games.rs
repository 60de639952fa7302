use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::AppError;

/// A finished or scheduled game as this crate uses it.
///
/// Built from the provider's `/games` envelope by [`parse_games_payload`]; games
/// without a parsable date or without both team names never make it this far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: Option<i64>,
    /// Calendar date of the game as sent by the provider (provider's offset).
    pub date: NaiveDate,
    pub kickoff: Option<DateTime<FixedOffset>>,
    pub home_team: String,
    pub away_team: String,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    /// Short status code (`FT`, `NS`, `AET`, ...).
    pub status: Option<String>,
    pub league_name: Option<String>,
}

impl Game {
    /// Sort key: calendar date, then kickoff time when known.
    pub fn sort_key(&self) -> (NaiveDate, Option<DateTime<FixedOffset>>) {
        (self.date, self.kickoff)
    }
}

#[derive(Debug, Deserialize)]
struct RawGame {
    id: Option<i64>,
    date: Option<String>,
    #[serde(default)]
    game: Option<RawNestedGame>,
    status: Option<RawStatus>,
    league: Option<RawLeague>,
    teams: Option<RawTeams>,
    scores: Option<RawScores>,
}

#[derive(Debug, Deserialize)]
struct RawNestedGame {
    date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawStatus {
    Detailed {
        short: Option<String>,
        long: Option<String>,
    },
    Plain(String),
}

#[derive(Debug, Deserialize)]
struct RawLeague {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawTeams {
    home: Option<RawTeam>,
    away: Option<RawTeam>,
}

#[derive(Debug, Deserialize)]
struct RawTeam {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawScores {
    home: Option<RawScore>,
    away: Option<RawScore>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawScore {
    Points(u32),
    Total { total: Option<u32> },
}

impl RawScore {
    fn points(&self) -> Option<u32> {
        match self {
            RawScore::Points(p) => Some(*p),
            RawScore::Total { total } => *total,
        }
    }
}

/// Parses a provider date. Accepts RFC 3339 timestamps and bare `YYYY-MM-DD`
/// prefixes; the calendar date is taken in the provider's own offset.
pub fn parse_game_date(raw: &str) -> Option<(NaiveDate, Option<DateTime<FixedOffset>>)> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some((ts.date_naive(), Some(ts)));
    }
    let day = raw.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .ok()
        .map(|date| (date, None))
}

fn game_from_raw(raw: RawGame) -> Result<Game, String> {
    let date_str = raw
        .date
        .or_else(|| raw.game.and_then(|g| g.date))
        .ok_or_else(|| "game has no date".to_string())?;
    let (date, kickoff) =
        parse_game_date(&date_str).ok_or_else(|| format!("unparsable game date '{date_str}'"))?;

    let (home, away) = match raw.teams {
        Some(RawTeams { home, away }) => (
            home.and_then(|t| t.name),
            away.and_then(|t| t.name),
        ),
        None => (None, None),
    };
    let home_team = home.ok_or_else(|| "game has no home team name".to_string())?;
    let away_team = away.ok_or_else(|| "game has no away team name".to_string())?;

    let (home_score, away_score) = match raw.scores {
        Some(scores) => (
            scores.home.as_ref().and_then(RawScore::points),
            scores.away.as_ref().and_then(RawScore::points),
        ),
        None => (None, None),
    };

    let status = raw.status.and_then(|status| match status {
        RawStatus::Detailed { short, long } => short.or(long),
        RawStatus::Plain(s) => Some(s),
    });

    Ok(Game {
        id: raw.id,
        date,
        kickoff,
        home_team,
        away_team,
        home_score,
        away_score,
        status,
        league_name: raw.league.and_then(|l| l.name),
    })
}

/// Parses the `/games` envelope into typed games.
///
/// The envelope must carry a `response` array; anything else is an
/// unexpected structure. Individual entries that cannot be turned into a
/// [`Game`] are logged and skipped.
pub fn parse_games_payload(payload: &Value, url: &str) -> Result<Vec<Game>, AppError> {
    let entries = payload
        .get("response")
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::api_unexpected_structure("missing `response` array", url))?;

    let mut games = Vec::with_capacity(entries.len());
    for entry in entries {
        let parsed = serde_json::from_value::<RawGame>(entry.clone())
            .map_err(|e| e.to_string())
            .and_then(game_from_raw);
        match parsed {
            Ok(game) => games.push(game),
            Err(reason) => warn!("Skipping game entry from {url}: {reason}"),
        }
    }

    Ok(games)
}
