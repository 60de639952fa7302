pub mod games_cache;
pub mod standings_cache;
pub mod types;

pub use games_cache::GamesCache;
pub use standings_cache::StandingsCache;
pub use types::{CachedStandings, SeasonKey};
