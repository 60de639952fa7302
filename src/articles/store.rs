//! Flat-file article collection.
//!
//! This is not a database. The whole collection lives in memory and every
//! write rewrites the whole JSON file. Reads clone the collection, default
//! display dates and sort it newest first.
//!
//! Records that do not read as articles are kept aside and written back
//! untouched, and their ids still count when assigning the next one. A file
//! that is not a JSON array at all reads as empty and is never overwritten.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument, warn};

use crate::error::AppError;

use super::models::{Article, DEFAULT_ARTICLE_TYPE, NewArticle};

#[derive(Debug, Default)]
struct Collection {
    articles: Vec<Article>,
    unreadable: Vec<Value>,
    writable: bool,
}

impl Collection {
    fn empty() -> Self {
        Self {
            writable: true,
            ..Self::default()
        }
    }

    fn next_id(&self) -> u64 {
        let article_ids = self.articles.iter().map(|a| a.id);
        let raw_ids = self
            .unreadable
            .iter()
            .filter_map(|raw| raw.get("id").and_then(Value::as_u64));
        article_ids.chain(raw_ids).max().map_or(1, |max| max + 1)
    }
}

#[derive(Debug)]
pub struct ArticleStore {
    path: PathBuf,
    collection: RwLock<Collection>,
}

/// Reads the collection file record by record.
async fn read_collection(path: &Path) -> Collection {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("No article file at {}, starting empty", path.display());
            return Collection::empty();
        }
        Err(e) => {
            error!("Cannot read article file {}: {}", path.display(), e);
            return Collection::default();
        }
    };

    let records = match serde_json::from_str::<Vec<Value>>(&content) {
        Ok(records) => records,
        Err(e) => {
            error!(
                "Article file {} is not a JSON array, serving it as empty and refusing writes: {}",
                path.display(),
                e
            );
            return Collection::default();
        }
    };

    let mut collection = Collection::empty();
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Article>(record.clone()) {
            Ok(article) => collection.articles.push(article),
            Err(e) => {
                warn!("Keeping unreadable record #{index} of {} as-is: {e}", path.display());
                collection.unreadable.push(record);
            }
        }
    }

    debug!(
        "Loaded {} articles ({} unreadable) from {}",
        collection.articles.len(),
        collection.unreadable.len(),
        path.display()
    );
    collection
}

fn with_display_date(mut article: Article, now: DateTime<Utc>) -> Article {
    if article.date.is_none() {
        article.date = Some(article.created_at.unwrap_or(now));
    }
    article
}

impl ArticleStore {
    /// Opens the collection at `path`.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let collection = read_collection(&path).await;
        Self {
            path,
            collection: RwLock::new(collection),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every article, display date defaulted, newest first.
    pub async fn get_all(&self) -> Vec<Article> {
        let now = Utc::now();
        let mut all: Vec<Article> = self
            .collection
            .read()
            .await
            .articles
            .iter()
            .cloned()
            .map(|a| with_display_date(a, now))
            .collect();
        all.sort_by(|a, b| b.date.cmp(&a.date));
        all
    }

    pub async fn get_by_id(&self, id: u64) -> Option<Article> {
        self.get_all().await.into_iter().find(|a| a.id == id)
    }

    pub async fn add_article(&self, new: NewArticle) -> Result<Article, AppError> {
        self.add_article_at(new, Utc::now()).await
    }

    /// Appends an article created at `now` and rewrites the file.
    ///
    /// The write lock is held from ID assignment until the file is replaced, so
    /// concurrent callers get distinct IDs. The in-memory collection only
    /// changes once the file write succeeded.
    #[instrument(skip(self, new), fields(title = %new.title))]
    pub async fn add_article_at(
        &self,
        new: NewArticle,
        now: DateTime<Utc>,
    ) -> Result<Article, AppError> {
        let mut collection = self.collection.write().await;
        if !collection.writable {
            return Err(AppError::store_error(format!(
                "{} could not be read; fix or remove it before adding articles",
                self.path.display()
            )));
        }

        let article = Article {
            id: collection.next_id(),
            title: new.title,
            content: new.content,
            article_type: new
                .article_type
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ARTICLE_TYPE.to_string()),
            league: new.league,
            season: new.season,
            created_at: Some(now),
            date: Some(new.date.unwrap_or(now)),
            topic: new.topic,
        };

        let mut updated = collection.articles.clone();
        updated.push(article.clone());
        self.write_collection(&updated, &collection.unreadable).await?;
        collection.articles = updated;

        info!("Stored article {} ({})", article.id, article.article_type);
        Ok(article)
    }

    /// Re-reads the file, replacing the in-memory collection. Returns the new count.
    pub async fn reload(&self) -> usize {
        let mut collection = self.collection.write().await;
        *collection = read_collection(&self.path).await;
        collection.articles.len()
    }

    async fn write_collection(
        &self,
        articles: &[Article],
        unreadable: &[Value],
    ) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }

        let mut records = Vec::with_capacity(articles.len() + unreadable.len());
        for article in articles {
            records.push(
                serde_json::to_value(article)
                    .map_err(|e| AppError::store_error(format!("cannot serialize article: {e}")))?,
            );
        }
        records.extend(unreadable.iter().cloned());

        let json = serde_json::to_string_pretty(&records)
            .map_err(|e| AppError::store_error(format!("cannot serialize articles: {e}")))?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json).await?;
        fs::rename(&tmp_path, &self.path).await?;
        debug!("Wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}
