use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const DEFAULT_ARTICLE_TYPE: &str = "generic";

fn default_article_type() -> String {
    DEFAULT_ARTICLE_TYPE.to_string()
}

/// Parses RFC 3339 timestamps and bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_flexible_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Hand-edited files may carry plain dates or garbage; garbage reads as absent.
fn deserialize_flexible_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(Value::as_str)
        .and_then(parse_flexible_datetime))
}

fn deserialize_text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A stored blog article. Serialized with camelCase keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: u64,
    #[serde(default, deserialize_with = "deserialize_text_or_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_text_or_empty")]
    pub content: String,
    #[serde(rename = "type", default = "default_article_type")]
    pub article_type: String,
    #[serde(default)]
    pub league: Option<String>,
    #[serde(default)]
    pub season: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_flexible_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    /// Display date, used for ordering.
    #[serde(default, deserialize_with = "deserialize_flexible_datetime")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

impl Article {
    pub fn is_vlog(&self) -> bool {
        self.article_type == "vlog"
    }
}

/// Fields supplied by the caller of `add_article`; the store fills in the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    #[serde(rename = "type", default)]
    pub article_type: Option<String>,
    #[serde(default)]
    pub league: Option<String>,
    #[serde(default)]
    pub season: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_flexible_datetime")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub topic: Option<String>,
}

impl NewArticle {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }
}
