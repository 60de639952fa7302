//! Rugby blog backend library
//!
//! Fetches historical rugby results and standings from an API-Sports style
//! provider, turns a simulated week of a past season into AI-written weekly
//! round-ups and opinion pieces, stores them in a flat JSON collection and
//! serves them over HTTP together with an HTML dashboard.
//!
//! # Examples
//!
//! ```rust,no_run
//! use rugby_blog::config::Config;
//! use rugby_blog::data_fetcher::api::{create_http_client_with_timeout, fetch_standings};
//! use rugby_blog::error::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
//!
//!     let table = fetch_standings(&client, &config, "TOP14", 2022).await?;
//!     for row in table.iter().take(3) {
//!         println!("{}. {} {:?}", row.position, row.team, row.points);
//!     }
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod articles;
pub mod cli;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod data_fetcher;
pub mod error;
pub mod generator;
pub mod logging;
pub mod scheduler;
pub mod server;
pub mod summary;

// Re-export commonly used types for convenience
pub use app::AppContext;
pub use articles::{Article, ArticleStore, NewArticle};
pub use config::Config;
pub use data_fetcher::{Game, League, StandingsRow};
pub use error::AppError;
pub use generator::{ArticleGenerator, GeneratedArticle};
pub use summary::build_summary;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
