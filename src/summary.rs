//! Plain-text round-up prompt built from a week of results and a standings excerpt.

use std::fmt::Write as _;

use crate::constants::window::SUMMARY_STANDINGS_ROWS;
use crate::data_fetcher::models::{Game, StandingsRow};

const UNKNOWN: &str = "?";
const DEFAULT_STATUS: &str = "FT/Played";

fn or_unknown<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| UNKNOWN.to_string(), |v| v.to_string())
}

fn game_line(game: &Game) -> String {
    format!(
        "- {}: {} {} - {} {} ({})",
        game.date.format("%Y-%m-%d"),
        game.home_team,
        or_unknown(game.home_score),
        or_unknown(game.away_score),
        game.away_team,
        game.status.as_deref().unwrap_or(DEFAULT_STATUS)
    )
}

fn standings_line(row: &StandingsRow) -> String {
    format!(
        "{}. {} - {} pts (P:{}, W:{}, L:{})",
        row.position,
        row.team,
        or_unknown(row.points),
        or_unknown(row.played),
        or_unknown(row.wins),
        or_unknown(row.losses)
    )
}

/// League display name: the provider's name on the first game, else the key.
pub fn league_display_name(league_key: &str, games: &[Game]) -> String {
    games
        .first()
        .and_then(|g| g.league_name.clone())
        .unwrap_or_else(|| league_key.to_string())
}

/// Renders the summary handed to the round-up prompt.
///
/// Games are listed oldest first. Up to six standings rows follow, or a
/// placeholder line when the table is empty. Absent numbers render as `?`.
pub fn build_summary(
    league_key: &str,
    league_name: &str,
    season: i32,
    games: &[Game],
    standings: &[StandingsRow],
) -> String {
    let mut sorted: Vec<&Game> = games.iter().collect();
    sorted.sort_by_key(|g| g.sort_key());

    let mut text = String::new();
    let _ = writeln!(text, "League: {league_name} ({league_key})");
    let _ = writeln!(text, "Historic season: {season}");
    text.push_str(
        "Week simulated around the current calendar date, but using historical data.\n\n",
    );
    text.push_str("Results in this simulated week:\n");

    for game in sorted {
        text.push_str(&game_line(game));
        text.push('\n');
    }

    if standings.is_empty() {
        text.push_str("\nStandings data not available for this league.\n");
    } else {
        text.push_str("\nStandings (top 6) for this historic season (likely final table):\n");
        for row in standings.iter().take(SUMMARY_STANDINGS_ROWS) {
            text.push_str(&standings_line(row));
            text.push('\n');
        }
    }

    text.push_str(
        "\nUse this data to write a weekly round-up for this league, as if it was happening this week, but clearly based on the historic season.\n",
    );
    text
}
