pub mod games;
pub mod standings;

pub use games::{Game, parse_game_date, parse_games_payload};
pub use standings::{StandingsRow, parse_standings_payload};
