//! URL builders for the sports-data provider.

fn trim_base(api_base: &str) -> &str {
    api_base.trim_end_matches('/')
}

/// Builds the URL listing every game of a league season.
///
/// # Example
/// ```
/// use rugby_blog::data_fetcher::api::build_games_url;
///
/// let url = build_games_url("https://v1.rugby.api-sports.io", 16, 2022);
/// assert_eq!(url, "https://v1.rugby.api-sports.io/games?league=16&season=2022");
/// ```
pub fn build_games_url(api_base: &str, league_id: u32, season: i32) -> String {
    format!("{}/games?league={league_id}&season={season}", trim_base(api_base))
}

/// Builds the standings URL for a league season.
///
/// # Example
/// ```
/// use rugby_blog::data_fetcher::api::build_standings_url;
///
/// let url = build_standings_url("http://localhost:9000/", 13, 2022);
/// assert_eq!(url, "http://localhost:9000/standings?league=13&season=2022");
/// ```
pub fn build_standings_url(api_base: &str, league_id: u32, season: i32) -> String {
    format!(
        "{}/standings?league={league_id}&season={season}",
        trim_base(api_base)
    )
}

/// Builds the chat-completion endpoint of an OpenAI-compatible provider.
///
/// # Example
/// ```
/// use rugby_blog::data_fetcher::api::build_chat_completions_url;
///
/// let url = build_chat_completions_url("https://router.huggingface.co/v1");
/// assert_eq!(url, "https://router.huggingface.co/v1/chat/completions");
/// ```
pub fn build_chat_completions_url(api_base: &str) -> String {
    format!("{}/chat/completions", trim_base(api_base))
}
