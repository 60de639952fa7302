use crate::cli::Args;
use crate::config::Config;
use crate::constants::LOG_FILE_NAME;
use crate::error::AppError;
use std::io::stdout;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn env_filter(debug: bool) -> Result<EnvFilter, AppError> {
    let directive = if debug {
        "rugby_blog=debug"
    } else {
        "rugby_blog=info"
    };
    let directive = directive
        .parse()
        .map_err(|e| AppError::log_setup_error(format!("Invalid log directive: {e}")))?;
    Ok(EnvFilter::from_default_env().add_directive(directive))
}

/// Splits a log file path into directory and file name, falling back to the
/// default directory and name for missing parts.
pub fn resolve_log_target(custom_path: Option<&str>) -> (String, String) {
    match custom_path {
        Some(custom_path) => {
            let path = Path::new(custom_path);
            let parent = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(LOG_FILE_NAME);
            (parent.to_string_lossy().to_string(), file_name.to_string())
        }
        None => (Config::get_log_dir_path(), LOG_FILE_NAME.to_string()),
    }
}

/// Sets up logging to stdout and a daily rolling log file.
///
/// The `--log-file` argument wins over the configured path. Returns the log
/// file path and the guard that must be kept alive for the duration of the
/// program to ensure proper log flushing.
pub async fn setup_logging(args: &Args, config: &Config) -> Result<(String, WorkerGuard), AppError> {
    let custom_log_path = args.log_file.as_deref().or(config.log_file_path.as_deref());
    let (log_dir, log_file_name) = resolve_log_target(custom_log_path);

    if !Path::new(&log_dir).exists() {
        tokio::fs::create_dir_all(&log_dir).await.map_err(|e| {
            AppError::log_setup_error(format!("Failed to create log directory: {e}"))
        })?;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, &log_file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::Layer::new()
                .with_writer(stdout)
                .with_ansi(true)
                .with_filter(env_filter(args.debug)?),
        )
        .with(
            fmt::Layer::new()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(env_filter(args.debug)?),
        )
        .try_init()
        .map_err(|e| AppError::log_setup_error(format!("Logger already set: {e}")))?;

    let log_file_path = format!("{log_dir}/{log_file_name}");
    Ok((log_file_path, guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_custom_log_target() {
        let (dir, file) = resolve_log_target(Some("/var/log/rugby/blog.log"));
        assert_eq!(dir, "/var/log/rugby");
        assert_eq!(file, "blog.log");
    }

    #[test]
    fn test_resolve_bare_file_name_uses_current_dir() {
        let (dir, file) = resolve_log_target(Some("blog.log"));
        assert_eq!(dir, ".");
        assert_eq!(file, "blog.log");
    }

    #[test]
    fn test_resolve_default_log_target() {
        let (dir, file) = resolve_log_target(None);
        assert_eq!(dir, Config::get_log_dir_path());
        assert_eq!(file, LOG_FILE_NAME);
    }

    #[test]
    fn test_env_filter_builds_for_both_levels() {
        assert!(env_filter(false).is_ok());
        assert!(env_filter(true).is_ok());
    }
}
