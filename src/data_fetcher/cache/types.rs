//! Cache entry types

use std::time::{Duration, Instant};
use tracing::debug;

use crate::data_fetcher::models::StandingsRow;

/// Cache key: provider league id and season year.
pub type SeasonKey = (u32, i32);

/// Normalized standings table with TTL support
#[derive(Debug, Clone)]
pub struct CachedStandings {
    pub data: Vec<StandingsRow>,
    pub cached_at: Instant,
    pub ttl: Duration,
}

impl CachedStandings {
    pub fn new(data: Vec<StandingsRow>, ttl: Duration) -> Self {
        Self {
            data,
            cached_at: Instant::now(),
            ttl,
        }
    }

    /// Checks if the entry has outlived its TTL
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Expiry check against an injected instant, for deterministic tests
    pub fn is_expired_at(&self, now: Instant) -> bool {
        let age = now.saturating_duration_since(self.cached_at);
        let is_expired = age > self.ttl;
        debug!(
            "Standings cache expiration check: age={:?}, ttl={:?}, is_expired={}",
            age, self.ttl, is_expired
        );
        is_expired
    }
}
