pub mod api;
pub mod cache;
pub mod historical_window;
pub mod leagues;
pub mod models;

pub use api::{fetch_all_games_for_season, fetch_historical_games, fetch_standings};
pub use cache::{GamesCache, StandingsCache};
pub use historical_window::{HistoricalWindow, compute_historical_window, filter_to_window};
pub use leagues::{League, resolve_league};
pub use models::{Game, StandingsRow};
