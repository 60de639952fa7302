//! HTML rendering of the dashboard page.

use reqwest::Url;
use std::fmt::Write as _;

use crate::articles::Article;
use crate::data_fetcher::models::StandingsRow;

use super::view::{
    ALL, Carousel, DashboardQuery, UNTITLED, content_paragraphs, filter_articles,
    format_display_date, league_tag, selected_article, type_tag, type_tag_class,
};
use crate::data_fetcher::leagues;

const TYPE_OPTIONS: &[(&str, &str)] = &[
    (ALL, "All types"),
    ("intro", "Intro"),
    ("roundup", "Round-up"),
    ("vlog", "Vlog / Opinion"),
];

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:0;background:#f4f5f7;color:#1d1f23}\
header{background:#0b3d2e;color:#fff;padding:1rem 2rem}\
.shell{display:grid;grid-template-columns:340px 1fr;gap:1.5rem;padding:1.5rem 2rem}\
.card{background:#fff;border-radius:8px;padding:1rem;margin-bottom:1rem}\
.item{display:block;padding:.5rem;border-radius:6px;color:inherit;text-decoration:none}\
.item.active{background:#e3efe9}.tag{font-size:.75rem;margin-right:.4rem;padding:.1rem .35rem;border-radius:4px;background:#eee}\
.tag-type-vlog{background:#fde2e2}.tag-type-roundup{background:#dbeafe}.tag-type-intro{background:#fef3c7}\
table{width:100%;border-collapse:collapse}td,th{padding:.25rem;text-align:left}td img{height:18px}";

/// Standings panel contents. `rows` is `None` when the fetch failed.
#[derive(Debug, Clone)]
pub struct StandingsPanel {
    pub carousel: Carousel,
    pub season: i32,
    pub rows: Option<Vec<StandingsRow>>,
}

/// Escapes text for HTML element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Relative dashboard link with URL-encoded parameters.
fn dashboard_href(params: &[(&str, &str)]) -> String {
    Url::parse_with_params("http://localhost/dashboard", params)
        .ok()
        .and_then(|url| url.query().map(|q| format!("/dashboard?{q}")))
        .unwrap_or_else(|| "/dashboard".to_string())
}

struct LinkState<'a> {
    type_filter: &'a str,
    league_filter: &'a str,
    standings: &'a str,
}

impl LinkState<'_> {
    /// Link keeping the current filters. `full` opens the full standings table.
    fn href(&self, article: Option<u64>, standings: Option<&str>, full: bool) -> String {
        let article = article.map(|id| id.to_string());
        let mut params = vec![
            ("type", self.type_filter),
            ("league", self.league_filter),
            ("standings", standings.unwrap_or(self.standings)),
        ];
        if full {
            params.push(("full", "1"));
        }
        if let Some(id) = article.as_deref() {
            params.push(("article", id));
        }
        escape_html(&dashboard_href(&params))
    }
}

fn render_filters(out: &mut String, type_filter: &str, league_filter: &str, standings: &str) {
    out.push_str("<form class=\"filters\" method=\"get\" action=\"/dashboard\">");
    out.push_str("<select name=\"type\">");
    for (value, label) in TYPE_OPTIONS {
        let selected = if *value == type_filter { " selected" } else { "" };
        let _ = write!(out, "<option value=\"{value}\"{selected}>{label}</option>");
    }
    out.push_str("</select><select name=\"league\">");
    let selected = if league_filter == ALL { " selected" } else { "" };
    let _ = write!(out, "<option value=\"{ALL}\"{selected}>All leagues</option>");
    for league in leagues::all() {
        let selected = if league.key == league_filter { " selected" } else { "" };
        let _ = write!(
            out,
            "<option value=\"{}\"{selected}>{}</option>",
            league.key,
            escape_html(league.label)
        );
    }
    let _ = write!(
        out,
        "</select><input type=\"hidden\" name=\"standings\" value=\"{}\"><button type=\"submit\">Filter</button></form>",
        escape_html(standings)
    );
}

fn render_article_list(
    out: &mut String,
    articles: &[&Article],
    selected_id: Option<u64>,
    links: &LinkState<'_>,
) {
    out.push_str("<nav class=\"articles\">");
    for article in articles {
        let active = if Some(article.id) == selected_id { " active" } else { "" };
        let title = if article.title.trim().is_empty() {
            UNTITLED
        } else {
            article.title.as_str()
        };
        let _ = write!(
            out,
            "<a class=\"item{active}\" href=\"{}\"><div class=\"title\">{}</div><div class=\"meta\"><span class=\"tag tag-date\">{}</span>",
            links.href(Some(article.id), None, false),
            escape_html(title),
            format_display_date(article.date)
        );
        if let Some(tag) = type_tag(&article.article_type) {
            let _ = write!(
                out,
                "<span class=\"tag {}\">{}</span>",
                type_tag_class(&tag),
                escape_html(&tag)
            );
        }
        if let Some(label) = league_tag(article) {
            let _ = write!(out, "<span class=\"tag tag-league\">{}</span>", escape_html(&label));
        }
        out.push_str("</div></a>");
    }
    if articles.is_empty() {
        out.push_str("<div class=\"empty-state\">No articles match this filter.</div>");
    }
    out.push_str("</nav>");
}

fn render_reader(out: &mut String, article: Option<&Article>) {
    out.push_str("<article class=\"card reader\">");
    match article {
        Some(article) => {
            let title = if article.title.trim().is_empty() {
                UNTITLED
            } else {
                article.title.as_str()
            };
            let _ = write!(
                out,
                "<h2>{}</h2><p class=\"date\">{}</p>",
                escape_html(title),
                format_display_date(article.date)
            );
            for paragraph in content_paragraphs(&article.content) {
                let _ = write!(out, "<p>{}</p>", escape_html(paragraph));
            }
        }
        None => out.push_str("<p>No articles yet.</p>"),
    }
    out.push_str("</article>");
}

fn logo_img(row: &StandingsRow) -> String {
    if row.logo.is_empty() {
        String::new()
    } else {
        format!("<img src=\"{}\" alt=\"\"> ", escape_html(&row.logo))
    }
}

fn render_standings(out: &mut String, panel: &StandingsPanel, links: &LinkState<'_>, article: Option<u64>) {
    let carousel = &panel.carousel;
    let _ = write!(
        out,
        "<section class=\"card standings\"><div class=\"carousel\"><a href=\"{}\">&#8249;</a> <strong>{}</strong> {} <a href=\"{}\">&#8250;</a></div>",
        links.href(article, Some(carousel.previous.key), false),
        escape_html(carousel.active.label),
        panel.season,
        links.href(article, Some(carousel.next.key), false),
    );

    match panel.rows.as_deref() {
        Some(rows) if !rows.is_empty() => {
            out.push_str("<table><thead><tr><th>#</th><th>Team</th><th>P</th><th>W</th><th>L</th><th>Pts</th></tr></thead><tbody>");
            for row in rows {
                let _ = write!(
                    out,
                    "<tr><td>{}</td><td>{}{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                    row.position,
                    logo_img(row),
                    escape_html(&row.team),
                    opt(row.played),
                    opt(row.wins),
                    opt(row.losses),
                    opt(row.points),
                );
            }
            let _ = write!(
                out,
                "</tbody></table><a class=\"full-link\" href=\"{}\">Full table</a>",
                links.href(article, None, true)
            );
        }
        _ => out.push_str("<p class=\"empty-state\">Standings not available.</p>"),
    }
    out.push_str("</section>");
}

/// Full table for the active league, shown in place of the reader.
fn render_full_standings(out: &mut String, panel: &StandingsPanel, links: &LinkState<'_>, article: Option<u64>) {
    let carousel = &panel.carousel;
    let label = escape_html(carousel.active.label);
    let _ = write!(
        out,
        "<article class=\"card full-standings\"><div class=\"standings-header\"><div><h2>{label} – Full Standings</h2><p class=\"standings-subtitle\">{} season (snapshot)</p></div>\
<div class=\"standings-nav\"><a href=\"{}\" aria-label=\"Previous league\">&#8249;</a> <a href=\"{}\" aria-label=\"Next league\">&#8250;</a></div></div>\
<div class=\"meta\"><span class=\"tag tag-league\">{label}</span><span class=\"tag tag-season\">SEASON {}</span></div>",
        panel.season,
        links.href(article, Some(carousel.previous.key), true),
        links.href(article, Some(carousel.next.key), true),
        panel.season,
    );

    match panel.rows.as_deref() {
        Some(rows) if !rows.is_empty() => {
            out.push_str("<table class=\"full\"><thead><tr><th>#</th><th>Team</th><th>P</th><th>W</th><th>D</th><th>L</th><th>F</th><th>A</th><th>Pts</th><th>Form</th></tr></thead><tbody>");
            for row in rows {
                let _ = write!(
                    out,
                    "<tr><td>{}</td><td>{}{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                    row.position,
                    logo_img(row),
                    escape_html(&row.team),
                    opt(row.played),
                    opt(row.wins),
                    row.draws,
                    opt(row.losses),
                    opt(row.points_for),
                    opt(row.against),
                    opt(row.points),
                    escape_html(&row.form),
                );
            }
            out.push_str("</tbody></table>");
        }
        _ => out.push_str("<p class=\"empty-state\">Standings not available.</p>"),
    }

    let _ = write!(
        out,
        "<p><a class=\"back\" href=\"{}\" aria-label=\"Back to articles\">&#8592; Back to articles</a></p></article>",
        links.href(article, None, false)
    );
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Renders the whole dashboard page. `articles` must be newest first.
pub fn render_dashboard(articles: &[Article], query: &DashboardQuery, panel: &StandingsPanel) -> String {
    let type_filter = query.type_filter();
    let league_filter = query.league_filter();
    let standings_key = panel.carousel.active.key;
    let links = LinkState {
        type_filter,
        league_filter: &league_filter,
        standings: standings_key,
    };

    let filtered = filter_articles(articles, type_filter, &league_filter);
    let selected = selected_article(articles, query.article_id());
    let selected_id = selected.map(|a| a.id);

    let mut out = String::with_capacity(8 * 1024);
    let _ = write!(
        out,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\"><title>Rugby Analytics Blog</title><style>{STYLE}</style></head><body>"
    );
    out.push_str("<header><h1>Rugby Analytics Blog</h1><p>Weekly rugby round-ups and opinion pieces written from historical data.</p></header>");
    out.push_str("<main class=\"shell\"><aside><section class=\"card\">");
    render_filters(&mut out, type_filter, &league_filter, standings_key);
    render_article_list(&mut out, &filtered, selected_id, &links);
    out.push_str("</section>");
    render_standings(&mut out, panel, &links, selected_id);
    out.push_str("</aside>");
    if query.full_standings() {
        render_full_standings(&mut out, panel, &links, selected_id);
    } else {
        render_reader(&mut out, selected);
    }
    out.push_str("</main></body></html>");
    out
}
