//! Shared application state and the long-running service mode.

use reqwest::Client;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::articles::ArticleStore;
use crate::config::Config;
use crate::data_fetcher::api::create_http_client_with_timeout;
use crate::data_fetcher::cache::{GamesCache, StandingsCache};
use crate::error::AppError;
use crate::generator::ArticleGenerator;
use crate::{scheduler, server};

/// Handles shared by the HTTP surface and the scheduler triggers.
///
/// Built once at startup and passed around as `Arc<AppContext>`.
#[derive(Debug)]
pub struct AppContext {
    pub config: Config,
    pub sports_client: Client,
    pub store: ArticleStore,
    pub games_cache: GamesCache,
    pub standings_cache: StandingsCache,
    pub generator: ArticleGenerator,
}

impl AppContext {
    pub async fn new(config: Config) -> Result<Self, AppError> {
        let sports_client = create_http_client_with_timeout(config.http_timeout_seconds)?;
        let generation_client =
            create_http_client_with_timeout(config.generation_timeout_seconds)?;

        if config.rugby_api_key.is_none() {
            warn!("Sports API key is not set; provider requests will be rejected");
        }
        if config.ai_api_key.is_none() {
            warn!("AI API key is not set; article generation will fail");
        }

        let store = ArticleStore::open(&config.data_file).await;
        let generator = ArticleGenerator::new(generation_client, &config);
        let standings_cache =
            StandingsCache::new(Duration::from_secs(config.standings_cache_ttl_seconds));

        Ok(Self {
            config,
            sports_client,
            store,
            games_cache: GamesCache::new(),
            standings_cache,
            generator,
        })
    }
}

/// Serves HTTP and, unless disabled, runs both weekly triggers until Ctrl-C.
pub async fn run_service(ctx: Arc<AppContext>, with_scheduler: bool) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], ctx.config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("Backend listening on {}", listener.local_addr()?);

    let triggers = if with_scheduler {
        scheduler::spawn_triggers(Arc::clone(&ctx))
    } else {
        info!("Scheduler disabled");
        Vec::new()
    };

    let router = server::router(Arc::clone(&ctx));
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    for trigger in triggers {
        trigger.abort();
    }
    info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Cannot listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    info!("Ctrl-C received, shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_context_opens_store_at_configured_path() {
        let dir = tempdir().unwrap();
        let data_file = dir.path().join("articles.json");
        let config = Config {
            data_file: data_file.to_string_lossy().to_string(),
            standings_cache_ttl_seconds: 0,
            ..Config::default()
        };

        let ctx = AppContext::new(config).await.unwrap();
        assert_eq!(ctx.store.path(), data_file.as_path());
        assert!(ctx.store.get_all().await.is_empty());
        assert!(!ctx.standings_cache.is_enabled());
        assert!(ctx.games_cache.is_empty().await);
    }
}
