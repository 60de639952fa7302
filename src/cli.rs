use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// One-shot modes run their job and exit instead of starting the service.
pub fn is_one_shot_mode(args: &Args) -> bool {
    args.roundup_now || args.vlog_now || args.import_article.is_some() || args.list_config
}

/// Rugby blog backend
///
/// Serves stored articles, league standings and an HTML dashboard over HTTP, and
/// writes new articles on a weekly schedule:
/// - Monday 20:00: one round-up per league from a simulated week of a past season
/// - Wednesday 20:00: one opinion piece on a topic not covered before
///
/// Provider keys are read from `API_RUGBY_KEY` and `HF_ACCESS_TOKEN` (a `.env`
/// file in the working directory is honoured).
#[derive(Parser, Debug, Default)]
#[command(about, version, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    /// Port to listen on. Overrides the config file and `PORT`.
    #[arg(long, short = 'p', help_heading = "Service")]
    pub port: Option<u16>,

    /// Do not start the weekly triggers; serve HTTP only.
    #[arg(long = "no-scheduler", help_heading = "Service")]
    pub no_scheduler: bool,

    /// Run the weekly round-up for every league once and exit.
    #[arg(long = "roundup-now", help_heading = "Jobs")]
    pub roundup_now: bool,

    /// Write one vlog article now and exit.
    #[arg(long = "vlog-now", help_heading = "Jobs")]
    pub vlog_now: bool,

    /// Add a hand-written article from a JSON file
    /// (`{"title", "content", "type"?, "league"?, "season"?, "date"?}`) and exit.
    #[arg(long = "import-article", value_name = "FILE", help_heading = "Jobs")]
    pub import_article: Option<String>,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,

    /// Log at debug level.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_service_flags() {
        let args = Args::parse_from(["rugby_blog", "--port", "8080", "--no-scheduler"]);
        assert_eq!(args.port, Some(8080));
        assert!(args.no_scheduler);
        assert!(!is_one_shot_mode(&args));
    }

    #[test]
    fn test_job_flags_are_one_shot() {
        let args = Args::parse_from(["rugby_blog", "--roundup-now"]);
        assert!(is_one_shot_mode(&args));

        let args = Args::parse_from(["rugby_blog", "--import-article", "intro.json"]);
        assert_eq!(args.import_article.as_deref(), Some("intro.json"));
        assert!(is_one_shot_mode(&args));
    }

    #[test]
    fn test_rejects_invalid_port() {
        assert!(Args::try_parse_from(["rugby_blog", "--port", "abc"]).is_err());
    }
}
