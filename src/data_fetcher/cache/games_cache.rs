//! Per-(league, season) store of full season results.
//!
//! Entries never expire: the first completed fetch for a key is kept for the
//! lifetime of the process, empty results included. Concurrent misses for one
//! key may both fetch; the second insert overwrites the first with the same data.

use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::data_fetcher::models::Game;

use super::types::SeasonKey;

#[derive(Debug, Default)]
pub struct GamesCache {
    entries: RwLock<HashMap<SeasonKey, Vec<Game>>>,
}

impl GamesCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(skip(self))]
    pub async fn get(&self, league_id: u32, season: i32) -> Option<Vec<Game>> {
        let entries = self.entries.read().await;
        let hit = entries.get(&(league_id, season)).cloned();
        debug!(
            "Games cache {} for league={} season={}",
            if hit.is_some() { "hit" } else { "miss" },
            league_id,
            season
        );
        hit
    }

    #[instrument(skip(self, games), fields(games = games.len()))]
    pub async fn insert(&self, league_id: u32, season: i32, games: Vec<Game>) {
        let mut entries = self.entries.write().await;
        info!(
            "Caching {} games for league={} season={}",
            games.len(),
            league_id,
            season
        );
        entries.insert((league_id, season), games);
    }

    /// Drops one entry so the next lookup refetches it.
    pub async fn invalidate(&self, league_id: u32, season: i32) -> bool {
        self.entries
            .write()
            .await
            .remove(&(league_id, season))
            .is_some()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
