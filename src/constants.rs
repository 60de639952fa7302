//! Application-wide constants and configuration values
//!
//! This module centralizes the magic numbers, default endpoints and prompt
//! parameters so the rest of the crate reads in terms of names.

/// Default timeout for sports-data HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Default timeout for text-generation requests in seconds (completions are slow)
pub const DEFAULT_GENERATION_TIMEOUT_SECONDS: u64 = 120;

/// Maximum number of idle connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Default HTTP port for the blog backend
pub const DEFAULT_PORT: u16 = 4000;

/// Season used when a request does not name one
pub const DEFAULT_SEASON: i32 = 2022;

/// Default location of the flat article collection
pub const DEFAULT_DATA_FILE: &str = "data/articles.json";

/// Log file name inside the log directory
pub const LOG_FILE_NAME: &str = "rugby_blog.log";

/// Default provider endpoints
pub mod endpoints {
    /// API-Sports rugby endpoint
    pub const RUGBY_API_BASE_URL: &str = "https://v1.rugby.api-sports.io";

    /// Header carrying the API-Sports key
    pub const RUGBY_API_KEY_HEADER: &str = "x-apisports-key";

    /// OpenAI-compatible chat completion router
    pub const AI_API_BASE_URL: &str = "https://router.huggingface.co/v1";

    /// Default chat model
    pub const AI_MODEL: &str = "meta-llama/Llama-3.1-8B-Instruct";
}

/// Text generation parameters
pub mod generation {
    /// Maximum output tokens requested from the model
    pub const MAX_TOKENS: u32 = 1200;

    /// Sampling temperature
    pub const TEMPERATURE: f32 = 0.7;

    /// How many previous vlogs are listed in the novelty digest
    pub const PRIOR_VLOG_DIGEST_SIZE: usize = 10;
}

/// Historical window parameters
pub mod window {
    /// Days covered backwards from the anchor date
    pub const DAYS_BACK: i64 = 7;

    /// Standings rows included in a round-up summary
    pub const SUMMARY_STANDINGS_ROWS: usize = 6;
}

/// Cache sizing and TTL values
pub mod cache_ttl {
    /// TTL for standings served over HTTP (1 hour)
    pub const STANDINGS_SECONDS: u64 = 3600;

    /// Maximum number of (league, season) standings tables held
    pub const STANDINGS_CAPACITY: usize = 32;
}

/// Environment variable names
pub mod env_vars {
    /// API-Sports key
    pub const RUGBY_API_KEY: &str = "API_RUGBY_KEY";

    /// Text-generation provider token
    pub const AI_API_KEY: &str = "HF_ACCESS_TOKEN";

    /// HTTP port override
    pub const PORT: &str = "PORT";

    /// Chat model override
    pub const MODEL: &str = "RUGBY_BLOG_MODEL";

    /// Sports API base URL override
    pub const RUGBY_API_BASE_URL: &str = "RUGBY_API_BASE_URL";

    /// Text-generation base URL override
    pub const AI_API_BASE_URL: &str = "RUGBY_AI_BASE_URL";

    /// Article data file override
    pub const DATA_FILE: &str = "RUGBY_BLOG_DATA_FILE";

    /// Log file path override
    pub const LOG_FILE: &str = "RUGBY_BLOG_LOG_FILE";

    /// Sports API timeout override in seconds
    pub const HTTP_TIMEOUT: &str = "RUGBY_BLOG_HTTP_TIMEOUT";
}
