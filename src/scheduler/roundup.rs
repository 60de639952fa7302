//! Weekly round-up trigger: one article per league with games in the window.

use chrono::{Local, NaiveDate};
use tracing::{error, info, instrument};

use crate::app::AppContext;
use crate::articles::{Article, NewArticle};
use crate::constants::window::DAYS_BACK;
use crate::data_fetcher::api::{fetch_historical_games, fetch_standings_by_id};
use crate::data_fetcher::leagues::{League, weekly_roundup_leagues};
use crate::error::AppError;
use crate::summary::{build_summary, league_display_name};

pub const ROUNDUP_ARTICLE_TYPE: &str = "roundup";

pub fn roundup_title(league_name: &str, season: i32, generated_title: &str) -> String {
    format!("{league_name} {season} – Weekly Round-Up: {generated_title}")
}

/// Runs the round-up for every weekly league, anchored on today's local date.
pub async fn run_roundup(ctx: &AppContext) -> Vec<Article> {
    run_roundup_for(ctx, weekly_roundup_leagues(), Local::now().date_naive()).await
}

/// Processes `leagues` one after another. A failing league is logged and
/// skipped; the articles stored for the others are returned.
pub async fn run_roundup_for<'a>(
    ctx: &AppContext,
    leagues: impl IntoIterator<Item = &'a League>,
    today: NaiveDate,
) -> Vec<Article> {
    info!("Running weekly round-ups for {today}");
    let mut stored = Vec::new();

    for league in leagues {
        match roundup_league(ctx, league, today).await {
            Ok(Some(article)) => {
                info!("Round-up article saved for {}: {}", league.key, article.title);
                stored.push(article);
            }
            Ok(None) => {}
            Err(e) => error!("Round-up for {} failed: {}", league.key, e),
        }
    }

    info!("Round-up cycle stored {} articles", stored.len());
    stored
}

#[instrument(skip(ctx, league), fields(league = league.key))]
async fn roundup_league(
    ctx: &AppContext,
    league: &League,
    today: NaiveDate,
) -> Result<Option<Article>, AppError> {
    let games = fetch_historical_games(
        &ctx.sports_client,
        &ctx.config,
        &ctx.games_cache,
        league.id,
        league.season,
        today,
        DAYS_BACK,
    )
    .await?;

    if games.is_empty() {
        info!("No games for {} in this week of {}, skipping", league.key, league.season);
        return Ok(None);
    }

    let standings =
        fetch_standings_by_id(&ctx.sports_client, &ctx.config, league.id, league.season).await?;
    let league_name = league_display_name(league.key, &games);
    let summary = build_summary(league.key, &league_name, league.season, &games, &standings);

    let generated = ctx.generator.generate_roundup_article(&summary).await?;

    let article = ctx
        .store
        .add_article(NewArticle {
            title: roundup_title(&league_name, league.season, &generated.title),
            content: generated.content,
            article_type: Some(ROUNDUP_ARTICLE_TYPE.to_string()),
            league: Some(league.key.to_string()),
            season: Some(league.season),
            ..NewArticle::default()
        })
        .await?;

    Ok(Some(article))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundup_title_prefix() {
        assert_eq!(
            roundup_title("Top 14", 2022, "Toulouse Roll On"),
            "Top 14 2022 – Weekly Round-Up: Toulouse Roll On"
        );
    }
}
