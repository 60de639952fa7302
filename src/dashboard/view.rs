//! Dashboard view model: filtering, tags, dates and carousel navigation.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::articles::Article;
use crate::data_fetcher::leagues::{self, League};

pub const ALL: &str = "ALL";
pub const UNTITLED: &str = "Untitled article";

/// Query string of `GET /dashboard`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardQuery {
    #[serde(rename = "type")]
    pub article_type: Option<String>,
    pub league: Option<String>,
    pub article: Option<String>,
    pub standings: Option<String>,
    /// Any of `1`, `true`, `yes` opens the full standings table.
    pub full: Option<String>,
}

impl DashboardQuery {
    pub fn type_filter(&self) -> &str {
        self.article_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(ALL)
    }

    pub fn league_filter(&self) -> String {
        self.league
            .as_deref()
            .filter(|l| !l.is_empty())
            .unwrap_or(ALL)
            .to_uppercase()
    }

    /// Requested article id; anything non-numeric is ignored.
    pub fn article_id(&self) -> Option<u64> {
        self.article.as_deref().and_then(|id| id.trim().parse().ok())
    }

    pub fn full_standings(&self) -> bool {
        self.full
            .as_deref()
            .map(str::trim)
            .is_some_and(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
    }
}

/// Upper-cased league key of an article, if it has one.
pub fn article_league(article: &Article) -> Option<String> {
    article.league.as_deref().map(str::to_uppercase)
}

/// Keeps articles matching both filters. `ALL` disables a filter.
pub fn filter_articles<'a>(
    articles: &'a [Article],
    type_filter: &str,
    league_filter: &str,
) -> Vec<&'a Article> {
    articles
        .iter()
        .filter(|a| type_filter == ALL || a.article_type == type_filter)
        .filter(|a| {
            league_filter.eq_ignore_ascii_case(ALL)
                || article_league(a).is_some_and(|l| l.eq_ignore_ascii_case(league_filter))
        })
        .collect()
}

/// Badge text for an article type; `None` hides the badge, as for `OTHER`.
pub fn type_tag(article_type: &str) -> Option<String> {
    let tag = match article_type.trim() {
        "" => return None,
        "vlog" => "VLOG".to_string(),
        "roundup" => "ROUND-UP".to_string(),
        "intro" => "INTRO".to_string(),
        other => other.to_uppercase(),
    };
    (tag != "OTHER").then_some(tag)
}

/// CSS class of a type badge.
pub fn type_tag_class(tag: &str) -> &'static str {
    let lower = tag.to_lowercase();
    if lower.contains("vlog") {
        "tag-type-vlog"
    } else if lower.contains("round") {
        "tag-type-roundup"
    } else if lower.contains("intro") {
        "tag-type-intro"
    } else {
        "tag-default"
    }
}

/// Badge text for an article's league. Unknown keys are shown verbatim,
/// `OTHER` is hidden.
pub fn league_tag(article: &Article) -> Option<String> {
    article_league(article)
        .filter(|key| key != "OTHER")
        .map(|key| leagues::label_for(&key))
}

/// `dd/mm/yyyy`, or "No date".
pub fn format_display_date(date: Option<DateTime<Utc>>) -> String {
    date.map_or_else(
        || "No date".to_string(),
        |d| d.format("%d/%m/%Y").to_string(),
    )
}

/// Non-empty lines of an article body, one paragraph each.
pub fn content_paragraphs(content: &str) -> Vec<&str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Article shown in the reader: the requested id when it exists, else the newest.
pub fn selected_article(articles: &[Article], requested: Option<u64>) -> Option<&Article> {
    requested
        .and_then(|id| articles.iter().find(|a| a.id == id))
        .or_else(|| articles.first())
}

/// Active standings league with its neighbours, cycling through the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    pub previous: &'static League,
    pub active: &'static League,
    pub next: &'static League,
}

/// First league after `from` in `step` direction (wrapping) for which
/// `has_rows` holds. Falls back to `from` when no other league qualifies.
fn next_available(
    all: &[League],
    from: usize,
    step: isize,
    has_rows: &impl Fn(&League) -> bool,
) -> usize {
    let n = all.len() as isize;
    (1..=n)
        .map(|k| (from as isize + step * k).rem_euclid(n) as usize)
        .find(|&i| has_rows(&all[i]))
        .unwrap_or(from)
}

/// Builds the carousel around the requested league, or the first one.
///
/// Previous and next skip leagues for which `has_rows` is false. Returns
/// `None` only when the registry is empty.
pub fn carousel(
    requested_key: Option<&str>,
    has_rows: impl Fn(&League) -> bool,
) -> Option<Carousel> {
    let all = leagues::all();
    if all.is_empty() {
        return None;
    }

    let index = requested_key
        .and_then(|key| all.iter().position(|l| l.key.eq_ignore_ascii_case(key.trim())))
        .unwrap_or(0);

    Some(Carousel {
        previous: &all[next_available(all, index, -1, &has_rows)],
        active: &all[index],
        next: &all[next_available(all, index, 1, &has_rows)],
    })
}
