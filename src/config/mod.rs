use crate::constants::{self, endpoints, env_vars, generation};
use crate::error::AppError;
use crate::scheduler::WeeklySchedule;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::info;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_log_dir_path};
use validation::validate_config;

/// Configuration structure for the blog backend.
/// Handles loading, saving, and managing provider endpoints, keys and schedules.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Port the HTTP surface listens on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Sports-data provider base URL (API-Sports rugby).
    #[serde(default = "default_rugby_api_base_url")]
    pub rugby_api_base_url: String,
    /// Sports-data provider key. Usually supplied through `API_RUGBY_KEY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rugby_api_key: Option<String>,
    /// Text-generation provider base URL (OpenAI-compatible `/chat/completions`).
    #[serde(default = "default_ai_api_base_url")]
    pub ai_api_base_url: String,
    /// Text-generation provider token. Usually supplied through `HF_ACCESS_TOKEN`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_api_key: Option<String>,
    /// Chat model identifier.
    #[serde(default = "default_ai_model")]
    pub ai_model: String,
    /// Maximum output tokens per generated article.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Sampling temperature for generation.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// HTTP timeout in seconds for sports-data requests. Defaults to 30 seconds.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// HTTP timeout in seconds for generation requests. Defaults to 120 seconds.
    #[serde(default = "default_generation_timeout")]
    pub generation_timeout_seconds: u64,
    /// Flat JSON file holding every article.
    #[serde(default = "default_data_file")]
    pub data_file: String,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// TTL of standings served over HTTP. Zero disables the cache.
    #[serde(default = "default_standings_cache_ttl")]
    pub standings_cache_ttl_seconds: u64,
    /// Season used by `/standings` when the request names none.
    #[serde(default = "default_season")]
    pub default_season: i32,
    /// Weekly slot of the round-up trigger.
    #[serde(default = "default_roundup_schedule")]
    pub roundup_schedule: WeeklySchedule,
    /// Weekly slot of the vlog trigger.
    #[serde(default = "default_vlog_schedule")]
    pub vlog_schedule: WeeklySchedule,
}

fn default_port() -> u16 {
    constants::DEFAULT_PORT
}

fn default_rugby_api_base_url() -> String {
    endpoints::RUGBY_API_BASE_URL.to_string()
}

fn default_ai_api_base_url() -> String {
    endpoints::AI_API_BASE_URL.to_string()
}

fn default_ai_model() -> String {
    endpoints::AI_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    generation::MAX_TOKENS
}

fn default_temperature() -> f32 {
    generation::TEMPERATURE
}

fn default_http_timeout() -> u64 {
    constants::DEFAULT_HTTP_TIMEOUT_SECONDS
}

fn default_generation_timeout() -> u64 {
    constants::DEFAULT_GENERATION_TIMEOUT_SECONDS
}

fn default_data_file() -> String {
    constants::DEFAULT_DATA_FILE.to_string()
}

fn default_standings_cache_ttl() -> u64 {
    constants::cache_ttl::STANDINGS_SECONDS
}

fn default_season() -> i32 {
    constants::DEFAULT_SEASON
}

// Monday 20:00 and Wednesday 20:00, local time
fn default_roundup_schedule() -> WeeklySchedule {
    WeeklySchedule::new(Weekday::Mon, 20, 0)
}

fn default_vlog_schedule() -> WeeklySchedule {
    WeeklySchedule::new(Weekday::Wed, 20, 0)
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: default_port(),
            rugby_api_base_url: default_rugby_api_base_url(),
            rugby_api_key: None,
            ai_api_base_url: default_ai_api_base_url(),
            ai_api_key: None,
            ai_model: default_ai_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            http_timeout_seconds: default_http_timeout(),
            generation_timeout_seconds: default_generation_timeout(),
            data_file: default_data_file(),
            log_file_path: None,
            standings_cache_ttl_seconds: default_standings_cache_ttl(),
            default_season: default_season(),
            roundup_schedule: default_roundup_schedule(),
            vlog_schedule: default_vlog_schedule(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// If no config file exists, a default one is written so the operator has
    /// something to edit. Environment variables (and a `.env` file, loaded by
    /// `main`) override config file values.
    ///
    /// # Environment Variables
    /// - `API_RUGBY_KEY` - Sports-data provider key
    /// - `HF_ACCESS_TOKEN` - Text-generation provider token
    /// - `PORT` - HTTP port
    /// - `RUGBY_BLOG_MODEL` - Chat model identifier
    /// - `RUGBY_API_BASE_URL` / `RUGBY_AI_BASE_URL` - Provider endpoints
    /// - `RUGBY_BLOG_DATA_FILE` - Article data file
    /// - `RUGBY_BLOG_LOG_FILE` - Log file path
    /// - `RUGBY_BLOG_HTTP_TIMEOUT` - Sports-data timeout in seconds
    ///
    /// # Returns
    /// * `Ok(Config)` - Successfully loaded or created configuration
    /// * `Err(AppError)` - Error occurred during load/create, or validation failed
    pub async fn load() -> Result<Self, AppError> {
        let config_path = get_config_path();

        let mut config = if Path::new(&config_path).exists() {
            Self::load_from_path(&config_path).await?
        } else {
            let config = Config::default();
            config.save_to_path(&config_path).await?;
            info!("Wrote default configuration to {config_path}");
            config
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Applies environment variable overrides on top of file values.
    /// Unparsable numeric overrides are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(env_vars::RUGBY_API_KEY) {
            self.rugby_api_key = Some(key);
        }

        if let Ok(key) = std::env::var(env_vars::AI_API_KEY) {
            self.ai_api_key = Some(key);
        }

        if let Some(port) = std::env::var(env_vars::PORT)
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.port = port;
        }

        if let Ok(model) = std::env::var(env_vars::MODEL) {
            self.ai_model = model;
        }

        if let Ok(url) = std::env::var(env_vars::RUGBY_API_BASE_URL) {
            self.rugby_api_base_url = url;
        }

        if let Ok(url) = std::env::var(env_vars::AI_API_BASE_URL) {
            self.ai_api_base_url = url;
        }

        if let Ok(data_file) = std::env::var(env_vars::DATA_FILE) {
            self.data_file = data_file;
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var(env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout_seconds = timeout;
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(self)
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Displays current configuration settings to stdout. Keys are masked.
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let log_dir = get_log_dir_path();

        if Path::new(&config_path).exists() {
            let config = Config::load().await?;
            println!("\nCurrent Configuration");
            println!("────────────────────────────────────");
            println!("Config Location:");
            println!("{config_path}");
            println!("────────────────────────────────────");
            println!("HTTP Port: {}", config.port);
            println!("Sports API: {}", config.rugby_api_base_url);
            println!("Sports API key: {}", mask_secret(config.rugby_api_key.as_deref()));
            println!("AI API: {}", config.ai_api_base_url);
            println!("AI API key: {}", mask_secret(config.ai_api_key.as_deref()));
            println!("AI model: {}", config.ai_model);
            println!("────────────────────────────────────");
            println!("Articles file: {}", config.data_file);
            println!("Round-up schedule: {}", config.roundup_schedule);
            println!("Vlog schedule: {}", config.vlog_schedule);
            println!("────────────────────────────────────");
            println!("Log File Location:");
            if let Some(custom_path) = &config.log_file_path {
                println!("{custom_path}");
            } else {
                println!("{log_dir}/{}", constants::LOG_FILE_NAME);
                println!("(Default location)");
            }
        } else {
            println!("\nNo configuration file found at:");
            println!("{config_path}");
        }

        Ok(())
    }

    /// Saves configuration to a custom file path, creating the parent directory
    /// when it does not exist.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.as_os_str().is_empty() && !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }
        let content = toml::to_string_pretty(self)?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a custom file path without environment overrides.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

fn mask_secret(secret: Option<&str>) -> String {
    match secret {
        Some(s) if s.chars().count() > 4 => format!("{}…", s.chars().take(4).collect::<String>()),
        Some(_) => "set".to_string(),
        None => "(not set)".to_string(),
    }
}
