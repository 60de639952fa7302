//! LRU-bounded TTL cache for normalized standings tables.
//!
//! Used by the HTTP surface and the dashboard only. A zero TTL disables caching.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::constants::cache_ttl;
use crate::data_fetcher::models::StandingsRow;

use super::types::{CachedStandings, SeasonKey};

#[derive(Debug)]
pub struct StandingsCache {
    entries: RwLock<LruCache<SeasonKey, CachedStandings>>,
    ttl: Duration,
}

impl StandingsCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(ttl, cache_ttl::STANDINGS_CAPACITY)
    }

    pub fn with_capacity(ttl: Duration, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: RwLock::new(LruCache::new(capacity)),
            ttl,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    #[instrument(skip(self))]
    pub async fn get(&self, league_id: u32, season: i32) -> Option<Vec<StandingsRow>> {
        if !self.is_enabled() {
            return None;
        }

        let key = (league_id, season);
        let mut entries = self.entries.write().await;
        match entries.get(&key) {
            Some(entry) if !entry.is_expired() => {
                debug!(
                    "Standings cache hit: league={}, season={}, age={:?}",
                    league_id,
                    season,
                    entry.cached_at.elapsed()
                );
                Some(entry.data.clone())
            }
            Some(_) => {
                debug!("Removing expired standings for league={league_id} season={season}");
                entries.pop(&key);
                None
            }
            None => None,
        }
    }

    pub async fn insert(&self, league_id: u32, season: i32, rows: Vec<StandingsRow>) {
        if !self.is_enabled() {
            return;
        }
        self.entries
            .write()
            .await
            .put((league_id, season), CachedStandings::new(rows, self.ttl));
    }

    pub async fn invalidate(&self, league_id: u32, season: i32) -> bool {
        self.entries
            .write()
            .await
            .pop(&(league_id, season))
            .is_some()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
