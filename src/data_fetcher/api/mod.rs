pub mod fetch_utils;
pub mod games_api;
pub mod http_client;
pub mod standings_api;
pub mod urls;

pub use fetch_utils::fetch_json;
pub use games_api::{fetch_all_games_for_season, fetch_historical_games};
pub use http_client::create_http_client_with_timeout;
pub use standings_api::{fetch_standings, fetch_standings_by_id, fetch_standings_cached};
pub use urls::{build_chat_completions_url, build_games_url, build_standings_url};
