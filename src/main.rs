// src/main.rs
use clap::Parser;
use rugby_blog::app::{AppContext, run_service};
use rugby_blog::articles::NewArticle;
use rugby_blog::cli::{Args, is_one_shot_mode};
use rugby_blog::config::Config;
use rugby_blog::error::AppError;
use rugby_blog::logging::setup_logging;
use rugby_blog::scheduler::{run_roundup, run_vlog};
use std::sync::Arc;
use tracing::{info, warn};

async fn import_article(ctx: &AppContext, path: &str) -> Result<(), AppError> {
    let content = tokio::fs::read_to_string(path).await?;
    let new: NewArticle = serde_json::from_str(&content)?;
    if new.title.trim().is_empty() || new.content.trim().is_empty() {
        return Err(AppError::config_error(format!(
            "{path}: article needs a non-empty title and content"
        )));
    }
    let article = ctx.store.add_article(new).await?;
    println!("Stored article {} ({}): {}", article.id, article.article_type, article.title);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // A missing .env is normal in production
    dotenv::dotenv().ok();

    let args = Args::parse();

    if args.list_config {
        Config::display().await?;
        return Ok(());
    }

    let mut config = Config::load().await?;
    if let Some(port) = args.port {
        config.port = port;
    }

    let (log_file_path, _guard) = setup_logging(&args, &config).await?;
    info!("Logs are being written to: {log_file_path}");

    let ctx = Arc::new(AppContext::new(config).await?);

    if is_one_shot_mode(&args) {
        if let Some(path) = args.import_article.as_deref() {
            import_article(&ctx, path).await?;
        }
        if args.roundup_now {
            let stored = run_roundup(&ctx).await;
            println!("Round-up finished: {} articles stored", stored.len());
            for article in &stored {
                println!("  #{} {}", article.id, article.title);
            }
        }
        if args.vlog_now {
            let article = run_vlog(&ctx).await?;
            println!("Vlog stored: #{} {}", article.id, article.title);
        }
        return Ok(());
    }

    if let Err(e) = run_service(ctx, !args.no_scheduler).await {
        warn!("Service stopped with an error: {e}");
        return Err(e);
    }
    Ok(())
}
