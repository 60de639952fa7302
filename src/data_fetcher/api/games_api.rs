//! Season results from the sports-data provider.

use chrono::NaiveDate;
use reqwest::Client;
use serde_json::Value;
use tracing::{info, instrument};

use crate::config::Config;
use crate::data_fetcher::cache::GamesCache;
use crate::data_fetcher::historical_window::{compute_historical_window, filter_to_window};
use crate::data_fetcher::models::{Game, parse_games_payload};
use crate::error::AppError;

use super::fetch_utils::{fetch_json, warn_on_provider_errors};
use super::urls::build_games_url;

/// Returns every game of a league season, from the cache when possible.
///
/// On a miss the provider is asked once and the parsed result is cached for
/// the lifetime of the process, even when it is empty.
#[instrument(skip(client, config, cache))]
pub async fn fetch_all_games_for_season(
    client: &Client,
    config: &Config,
    cache: &GamesCache,
    league_id: u32,
    season: i32,
) -> Result<Vec<Game>, AppError> {
    if let Some(games) = cache.get(league_id, season).await {
        return Ok(games);
    }

    let url = build_games_url(&config.rugby_api_base_url, league_id, season);
    let payload: Value = fetch_json(client, &url, config.rugby_api_key.as_deref()).await?;
    warn_on_provider_errors(&payload, &url);

    let games = parse_games_payload(&payload, &url)?;
    info!(
        "Fetched {} games for league={} season={}",
        games.len(),
        league_id,
        season
    );
    cache.insert(league_id, season, games.clone()).await;

    Ok(games)
}

/// Games of `season` that fall into the historical window anchored on `today`.
#[instrument(skip(client, config, cache))]
pub async fn fetch_historical_games(
    client: &Client,
    config: &Config,
    cache: &GamesCache,
    league_id: u32,
    season: i32,
    today: NaiveDate,
    days_back: i64,
) -> Result<Vec<Game>, AppError> {
    let Some(window) = compute_historical_window(today, season, days_back) else {
        return Err(AppError::datetime_parse_error(format!(
            "Cannot place {today} on season {season}"
        )));
    };

    let games = fetch_all_games_for_season(client, config, cache, league_id, season).await?;
    Ok(filter_to_window(&games, &window))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::api::http_client::create_test_http_client;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base: &str) -> Config {
        Config {
            rugby_api_base_url: base.to_string(),
            rugby_api_key: Some("test-key".to_string()),
            ..Config::default()
        }
    }

    fn game_json(date: &str, home: &str, away: &str) -> serde_json::Value {
        json!({
            "date": date,
            "status": {"short": "FT"},
            "league": {"name": "Top 14"},
            "teams": {"home": {"name": home}, "away": {"name": away}},
            "scores": {"home": 21, "away": 14}
        })
    }

    #[tokio::test]
    async fn test_second_call_is_served_from_cache() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/games"))
            .and(query_param("league", "16"))
            .and(query_param("season", "2022"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errors": [],
                "response": [game_json("2022-10-15T15:00:00+00:00", "Toulouse", "Racing 92")]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_http_client();
        let config = test_config(&mock_server.uri());
        let cache = GamesCache::new();

        let first = fetch_all_games_for_season(&client, &config, &cache, 16, 2022)
            .await
            .unwrap();
        let second = fetch_all_games_for_season(&client, &config, &cache, 16, 2022)
            .await
            .unwrap();

        assert_eq!(first.len(), 1);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_provider_errors_still_cache_empty_result() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/games"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errors": {"requests": "You have reached the request limit for the day"},
                "response": []
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_http_client();
        let config = test_config(&mock_server.uri());
        let cache = GamesCache::new();

        let games = fetch_all_games_for_season(&client, &config, &cache, 13, 2022)
            .await
            .unwrap();
        assert!(games.is_empty());
        assert_eq!(cache.get(13, 2022).await, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_http_failure_is_not_cached() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/games"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = create_test_http_client();
        let config = test_config(&mock_server.uri());
        let cache = GamesCache::new();

        let result = fetch_all_games_for_season(&client, &config, &cache, 76, 2022).await;
        assert!(matches!(result, Err(AppError::ApiServiceUnavailable { .. })));
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_historical_games_are_filtered_to_window() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/games"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": [
                    game_json("2022-10-10T15:00:00+00:00", "A", "B"),
                    game_json("2022-10-13T15:00:00+00:00", "C", "D"),
                    game_json("2022-10-19T15:00:00+00:00", "E", "F"),
                    game_json("2022-10-20T15:00:00+00:00", "G", "H")
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_http_client();
        let config = test_config(&mock_server.uri());
        let cache = GamesCache::new();
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

        let games = fetch_historical_games(&client, &config, &cache, 16, 2022, today, 7)
            .await
            .unwrap();
        let homes: Vec<&str> = games.iter().map(|g| g.home_team.as_str()).collect();
        assert_eq!(homes, vec!["C", "E"]);
    }
}
