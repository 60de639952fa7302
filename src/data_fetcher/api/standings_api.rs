//! League tables from the sports-data provider.

use reqwest::Client;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::data_fetcher::cache::StandingsCache;
use crate::data_fetcher::leagues::resolve_league;
use crate::data_fetcher::models::{StandingsRow, parse_standings_payload};
use crate::error::AppError;

use super::fetch_utils::{fetch_json, warn_on_provider_errors};
use super::urls::build_standings_url;

/// Fetches and normalizes the standings of a league given by key or numeric id.
///
/// Fails for an unknown league or a transport/HTTP failure. A payload without
/// a recognizable table yields an empty table.
pub async fn fetch_standings(
    client: &Client,
    config: &Config,
    league_key_or_id: &str,
    season: i32,
) -> Result<Vec<StandingsRow>, AppError> {
    let league_id = resolve_league(league_key_or_id)?;
    fetch_standings_by_id(client, config, league_id, season).await
}

#[instrument(skip(client, config))]
pub async fn fetch_standings_by_id(
    client: &Client,
    config: &Config,
    league_id: u32,
    season: i32,
) -> Result<Vec<StandingsRow>, AppError> {
    let url = build_standings_url(&config.rugby_api_base_url, league_id, season);
    let payload: Value = fetch_json(client, &url, config.rugby_api_key.as_deref()).await?;
    warn_on_provider_errors(&payload, &url);

    match parse_standings_payload(&payload, &url) {
        Ok(rows) => {
            info!(
                "Fetched {} standings rows for league={} season={}",
                rows.len(),
                league_id,
                season
            );
            Ok(rows)
        }
        Err(AppError::ApiUnexpectedStructure { message, .. }) => {
            warn!("No standings table for league={league_id} season={season}: {message}");
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

/// Same as [`fetch_standings`], going through a TTL cache first.
pub async fn fetch_standings_cached(
    client: &Client,
    config: &Config,
    cache: &StandingsCache,
    league_key_or_id: &str,
    season: i32,
) -> Result<Vec<StandingsRow>, AppError> {
    let league_id = resolve_league(league_key_or_id)?;
    if let Some(rows) = cache.get(league_id, season).await {
        return Ok(rows);
    }

    let rows = fetch_standings_by_id(client, config, league_id, season).await?;
    cache.insert(league_id, season, rows.clone()).await;
    Ok(rows)
}
