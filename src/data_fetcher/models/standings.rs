use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::AppError;

/// One row of a league table in the shape served by `GET /standings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub position: u32,
    pub team: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub played: Option<u32>,
    #[serde(default)]
    pub wins: Option<u32>,
    #[serde(default)]
    pub draws: u32,
    #[serde(default)]
    pub losses: Option<u32>,
    #[serde(default)]
    pub points: Option<i32>,
    #[serde(rename = "for", default)]
    pub points_for: Option<i32>,
    #[serde(default)]
    pub against: Option<i32>,
    #[serde(default)]
    pub form: String,
}

#[derive(Debug, Deserialize)]
struct RawRow {
    position: Option<u32>,
    rank: Option<u32>,
    team: Option<RawTeam>,
    games: Option<RawGames>,
    all: Option<RawAll>,
    points: Option<i32>,
    points_total: Option<i32>,
    #[serde(rename = "pointsTotal")]
    points_total_camel: Option<i32>,
    goals: Option<RawGoals>,
    points_for: Option<i32>,
    points_against: Option<i32>,
    form: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawTeam {
    name: Option<String>,
    logo: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawTotal {
    total: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawGames {
    played: Option<u32>,
    win: Option<RawTotal>,
    draw: Option<RawTotal>,
    lose: Option<RawTotal>,
}

#[derive(Debug, Deserialize)]
struct RawAll {
    played: Option<u32>,
    win: Option<u32>,
    draw: Option<u32>,
    lose: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawGoals {
    #[serde(rename = "for")]
    scored: Option<i32>,
    against: Option<i32>,
}

fn total(value: Option<&RawTotal>) -> Option<u32> {
    value.and_then(|t| t.total)
}

fn row_from_raw(raw: RawRow) -> Result<StandingsRow, String> {
    let position = raw
        .position
        .or(raw.rank)
        .ok_or_else(|| "row has no position or rank".to_string())?;
    let (team, logo) = match raw.team {
        Some(RawTeam { name: Some(name), logo }) => (name, logo.unwrap_or_default()),
        _ => return Err("row has no team name".to_string()),
    };

    let games = raw.games.as_ref();
    let all = raw.all.as_ref();

    Ok(StandingsRow {
        position,
        team,
        logo,
        played: games
            .and_then(|g| g.played)
            .or_else(|| all.and_then(|a| a.played)),
        wins: total(games.and_then(|g| g.win.as_ref())).or_else(|| all.and_then(|a| a.win)),
        draws: total(games.and_then(|g| g.draw.as_ref()))
            .or_else(|| all.and_then(|a| a.draw))
            .unwrap_or(0),
        losses: total(games.and_then(|g| g.lose.as_ref())).or_else(|| all.and_then(|a| a.lose)),
        points: raw.points.or(raw.points_total).or(raw.points_total_camel),
        points_for: raw
            .goals
            .as_ref()
            .and_then(|g| g.scored)
            .or(raw.points_for),
        against: raw
            .goals
            .as_ref()
            .and_then(|g| g.against)
            .or(raw.points_against),
        form: raw.form.unwrap_or_default(),
    })
}

/// Locates the provider's raw row array inside a standings payload.
fn raw_rows(payload: &Value) -> Option<&Vec<Value>> {
    let first = payload
        .get("response")
        .and_then(Value::as_array)
        .and_then(|r| r.first());

    // `response: [[row, ...], ...]`, first group wins
    if let Some(rows) = first.and_then(Value::as_array) {
        return Some(rows);
    }

    // `response: [{ league: { standings: [[row, ...]] } }]`
    first
        .and_then(|f| f.pointer("/league/standings/0"))
        .and_then(Value::as_array)
}

/// Normalizes a standings payload into [`StandingsRow`]s.
///
/// Recognized shapes, tried in order:
/// 1. `response` is an array whose first element is the row array
/// 2. `response[0].league.standings[0]` is the row array
/// 3. `table` is an array of already normalized rows
///
/// Rows lacking a position or a team name are logged and dropped. A payload
/// matching none of the shapes yields `ApiUnexpectedStructure`.
pub fn parse_standings_payload(payload: &Value, url: &str) -> Result<Vec<StandingsRow>, AppError> {
    if let Some(rows) = raw_rows(payload) {
        let mut parsed = Vec::with_capacity(rows.len());
        for row in rows {
            let result = serde_json::from_value::<RawRow>(row.clone())
                .map_err(|e| e.to_string())
                .and_then(row_from_raw);
            match result {
                Ok(row) => parsed.push(row),
                Err(reason) => warn!("Skipping standings row from {url}: {reason}"),
            }
        }
        return Ok(parsed);
    }

    if let Some(table) = payload.get("table").and_then(Value::as_array) {
        let mut parsed = Vec::with_capacity(table.len());
        for row in table {
            match serde_json::from_value::<StandingsRow>(row.clone()) {
                Ok(row) => parsed.push(row),
                Err(e) => warn!("Skipping standings table row from {url}: {e}"),
            }
        }
        return Ok(parsed);
    }

    Err(AppError::api_unexpected_structure(
        "no recognizable standings array",
        url,
    ))
}
