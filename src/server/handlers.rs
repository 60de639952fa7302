//! Route handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::Html;
use serde::Deserialize;
use futures::future::join_all;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error};

use crate::app::AppContext;
use crate::articles::Article;
use crate::dashboard::{DashboardQuery, StandingsPanel, carousel, render_dashboard};
use crate::data_fetcher::api::fetch_standings_cached;
use crate::data_fetcher::leagues::{self, League};
use crate::data_fetcher::models::StandingsRow;
use crate::error::AppError;

use super::error::ApiError;

pub async fn root() -> Json<Value> {
    Json(json!({ "status": "ok", "source": "Rugby AI backend" }))
}

pub async fn list_articles(State(ctx): State<Arc<AppContext>>) -> Json<Vec<Article>> {
    Json(ctx.store.get_all().await)
}

/// Ids are taken as strings so that a non-numeric id is a 404 rather than a 400.
pub async fn get_article(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<Json<Article>, ApiError> {
    let Ok(id) = id.trim().parse::<u64>() else {
        return Err(ApiError::not_found("Article not found"));
    };
    ctx.store
        .get_by_id(id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Article not found"))
}

#[derive(Debug, Default, Deserialize)]
pub struct StandingsQuery {
    pub league: Option<String>,
    pub season: Option<String>,
}

pub async fn get_standings(
    State(ctx): State<Arc<AppContext>>,
    Query(query): Query<StandingsQuery>,
) -> Result<Json<Value>, ApiError> {
    let Some(league) = query
        .league
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
    else {
        return Err(ApiError::bad_request("league query parameter is required"));
    };

    let season = match query.season.as_deref().map(str::trim) {
        None | Some("") => ctx.config.default_season,
        Some(raw) => raw
            .parse::<i32>()
            .map_err(|_| ApiError::bad_request(format!("invalid season: {raw}")))?,
    };

    let table = fetch_standings_cached(
        &ctx.sports_client,
        &ctx.config,
        &ctx.standings_cache,
        league,
        season,
    )
    .await?;

    debug!("Serving {} standings rows for {} {}", table.len(), league, season);
    Ok(Json(json!({ "league": league, "season": season, "table": table })))
}

/// Standings of every registry league, fetched concurrently through the cache.
/// A failed fetch is logged and reads as `None`.
async fn all_league_standings(ctx: &AppContext) -> HashMap<&'static str, Option<Vec<StandingsRow>>> {
    let fetches = leagues::all().iter().map(|league| async move {
        let rows = match fetch_standings_cached(
            &ctx.sports_client,
            &ctx.config,
            &ctx.standings_cache,
            league.key,
            league.season,
        )
        .await
        {
            Ok(rows) => Some(rows),
            Err(e) => {
                error!("Dashboard standings for {} failed: {}", league.key, e);
                None
            }
        };
        (league.key, rows)
    });
    join_all(fetches).await.into_iter().collect()
}

pub async fn dashboard(
    State(ctx): State<Arc<AppContext>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Html<String>, ApiError> {
    let mut standings = all_league_standings(&ctx).await;
    let has_rows = |league: &League| {
        standings
            .get(league.key)
            .is_some_and(|rows| rows.as_ref().is_some_and(|r| !r.is_empty()))
    };
    let Some(carousel) = carousel(query.standings.as_deref(), has_rows) else {
        return Err(AppError::config_error("league registry is empty").into());
    };

    let league = carousel.active;
    let panel = StandingsPanel {
        carousel,
        season: league.season,
        rows: standings.remove(league.key).flatten(),
    };
    let articles = ctx.store.get_all().await;
    Ok(Html(render_dashboard(&articles, &query, &panel)))
}
