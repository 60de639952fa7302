use chrono::NaiveDate;
use rugby_blog::app::AppContext;
use rugby_blog::config::Config;
use rugby_blog::data_fetcher::leagues::lookup;
use rugby_blog::scheduler::run_roundup_for;
use serde_json::{Value, json};
use tempfile::{TempDir, tempdir};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// A Monday; with the 2022 season the window is 2022-10-12..=2022-10-19
fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

async fn context(sports: &MockServer, ai: &MockServer) -> (AppContext, TempDir) {
    let dir = tempdir().unwrap();
    let config = Config {
        rugby_api_base_url: sports.uri(),
        rugby_api_key: Some("sports-key".to_string()),
        ai_api_base_url: ai.uri(),
        ai_api_key: Some("hf_test".to_string()),
        data_file: dir.path().join("articles.json").to_string_lossy().to_string(),
        ..Config::default()
    };
    (AppContext::new(config).await.unwrap(), dir)
}

fn game(id: i64, date: &str, home: &str, away: &str, score: (u32, u32)) -> Value {
    json!({
        "id": id,
        "date": date,
        "status": {"short": "FT", "long": "Finished"},
        "league": {"id": 16, "name": "Top 14"},
        "teams": {"home": {"name": home}, "away": {"name": away}},
        "scores": {"home": score.0, "away": score.1}
    })
}

fn top14_games() -> Value {
    json!({
        "errors": [],
        "response": [
            game(1, "2022-10-01T15:00:00+00:00", "Brive", "Pau", (10, 12)),
            game(2, "2022-10-15T19:05:00+02:00", "Toulouse", "Clermont", (27, 20)),
            game(3, "2022-10-13T21:00:00+02:00", "Racing 92", "Toulon", (18, 18)),
            game(4, "2022-10-16T21:05:00+02:00", "La Rochelle", "Bordeaux", (31, 24)),
            game(5, "2022-10-29T17:00:00+02:00", "Lyon", "Castres", (22, 9))
        ]
    })
}

fn top14_standings() -> Value {
    let rows: Vec<Value> = ["Toulouse", "La Rochelle", "Bordeaux", "Racing 92", "Toulon"]
        .iter()
        .enumerate()
        .map(|(i, team)| {
            json!({
                "position": i + 1,
                "team": {"id": i, "name": team, "logo": format!("https://media/{i}.png")},
                "games": {"played": 8, "win": {"total": 6 - i}, "draw": {"total": 0}, "lose": {"total": 2 + i}},
                "points": 30 - 4 * i as i32
            })
        })
        .collect();
    json!({ "errors": [], "response": [rows] })
}

fn completion(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{"message": {"role": "assistant", "content": text}}]
    }))
}

#[tokio::test]
async fn test_weekly_roundup_end_to_end() {
    let sports = MockServer::start().await;
    let ai = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/games"))
        .and(query_param("league", "16"))
        .and(query_param("season", "2022"))
        .respond_with(ResponseTemplate::new(200).set_body_json(top14_games()))
        .expect(1)
        .mount(&sports)
        .await;
    Mock::given(method("GET"))
        .and(path("/standings"))
        .and(query_param("league", "16"))
        .respond_with(ResponseTemplate::new(200).set_body_json(top14_standings()))
        .expect(1)
        .mount(&sports)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(completion(
            "# Toulouse Keep Control\n\nToulouse edged Clermont.\nRacing and Toulon shared the spoils.",
        ))
        .expect(1)
        .mount(&ai)
        .await;

    let (ctx, _dir) = context(&sports, &ai).await;
    let league = lookup("TOP14").unwrap();

    let stored = run_roundup_for(&ctx, [league], today()).await;

    assert_eq!(stored.len(), 1);
    let article = &stored[0];
    assert_eq!(
        article.title,
        "Top 14 2022 – Weekly Round-Up: Toulouse Keep Control"
    );
    assert_eq!(article.article_type, "roundup");
    assert_eq!(article.league.as_deref(), Some("TOP14"));
    assert_eq!(article.season, Some(2022));
    assert!(article.content.starts_with("Toulouse edged Clermont."));

    // The prompt carries the three in-window games oldest first and the table
    let requests = ai.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let prompt = body["messages"][1]["content"].as_str().unwrap();
    assert!(prompt.contains("League: Top 14 (TOP14)"));
    let racing = prompt.find("- 2022-10-13: Racing 92 18 - 18 Toulon (FT)").unwrap();
    let toulouse = prompt.find("- 2022-10-15: Toulouse 27 - 20 Clermont (FT)").unwrap();
    let rochelle = prompt.find("- 2022-10-16: La Rochelle 31 - 24 Bordeaux (FT)").unwrap();
    assert!(racing < toulouse && toulouse < rochelle);
    assert!(!prompt.contains("Brive"));
    assert!(!prompt.contains("Castres"));
    assert!(prompt.contains("1. Toulouse - 30 pts (P:8, W:6, L:2)"));
    assert!(prompt.contains("5. Toulon - 14 pts (P:8, W:2, L:6)"));

    let all = ctx.store.get_all().await;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, 1);
}

#[tokio::test]
async fn test_league_without_games_in_window_is_skipped() {
    let sports = MockServer::start().await;
    let ai = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/games"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": [game(1, "2022-03-01T15:00:00+00:00", "Ulster", "Munster", (20, 10))]
        })))
        .mount(&sports)
        .await;
    Mock::given(method("GET"))
        .and(path("/standings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(top14_standings()))
        .expect(0)
        .mount(&sports)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(completion("unused"))
        .expect(0)
        .mount(&ai)
        .await;

    let (ctx, _dir) = context(&sports, &ai).await;
    let stored = run_roundup_for(&ctx, [lookup("URC").unwrap()], today()).await;

    assert!(stored.is_empty());
    assert!(ctx.store.get_all().await.is_empty());
}

#[tokio::test]
async fn test_failing_league_does_not_stop_the_others() {
    let sports = MockServer::start().await;
    let ai = MockServer::start().await;

    // Premiership (13) fails at the provider, Top 14 (16) succeeds
    Mock::given(method("GET"))
        .and(path("/games"))
        .and(query_param("league", "13"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&sports)
        .await;
    Mock::given(method("GET"))
        .and(path("/games"))
        .and(query_param("league", "16"))
        .respond_with(ResponseTemplate::new(200).set_body_json(top14_games()))
        .mount(&sports)
        .await;
    Mock::given(method("GET"))
        .and(path("/standings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(top14_standings()))
        .mount(&sports)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(completion("Title Line\nBody line."))
        .expect(1)
        .mount(&ai)
        .await;

    let (ctx, _dir) = context(&sports, &ai).await;
    let leagues = [lookup("PREMIERSHIP").unwrap(), lookup("TOP14").unwrap()];
    let stored = run_roundup_for(&ctx, leagues, today()).await;

    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].league.as_deref(), Some("TOP14"));
}

#[tokio::test]
async fn test_season_games_are_fetched_once_per_process() {
    let sports = MockServer::start().await;
    let ai = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/games"))
        .respond_with(ResponseTemplate::new(200).set_body_json(top14_games()))
        .expect(1)
        .mount(&sports)
        .await;
    Mock::given(method("GET"))
        .and(path("/standings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(top14_standings()))
        .expect(2)
        .mount(&sports)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(completion("Again\nSame week."))
        .expect(2)
        .mount(&ai)
        .await;

    let (ctx, _dir) = context(&sports, &ai).await;
    let league = lookup("TOP14").unwrap();
    run_roundup_for(&ctx, [league], today()).await;
    let second = run_roundup_for(&ctx, [league], today()).await;

    assert_eq!(second.len(), 1);
    assert_eq!(second[0].id, 2);
}
