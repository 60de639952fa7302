use rand::SeedableRng;
use rand::rngs::SmallRng;
use rugby_blog::app::AppContext;
use rugby_blog::articles::NewArticle;
use rugby_blog::config::Config;
use rugby_blog::scheduler::vlog::{build_prior_vlogs_digest, pick_next_vlog_topic};
use rugby_blog::scheduler::{VLOG_TOPICS, run_vlog};
use serde_json::{Value, json};
use std::collections::HashSet;
use tempfile::{TempDir, tempdir};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn context(ai: &MockServer) -> (AppContext, TempDir) {
    let dir = tempdir().unwrap();
    let config = Config {
        ai_api_base_url: ai.uri(),
        ai_api_key: Some("hf_test".to_string()),
        data_file: dir.path().join("articles.json").to_string_lossy().to_string(),
        ..Config::default()
    };
    (AppContext::new(config).await.unwrap(), dir)
}

async fn seed_vlog(ctx: &AppContext, title: &str, topic: &str) {
    ctx.store
        .add_article(NewArticle {
            title: title.to_string(),
            content: "body".to_string(),
            article_type: Some("vlog".to_string()),
            topic: Some(topic.to_string()),
            ..NewArticle::default()
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_vlog_uses_the_only_unused_topic() {
    let ai = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": "Fresh Angle\nSomething new."}}]
        })))
        .expect(1)
        .mount(&ai)
        .await;

    let (ctx, _dir) = context(&ai).await;
    for (i, topic) in VLOG_TOPICS.iter().enumerate().skip(1) {
        seed_vlog(&ctx, &format!("Old vlog {i}"), topic).await;
    }

    let article = run_vlog(&ctx).await.unwrap();

    assert_eq!(article.topic.as_deref(), Some(VLOG_TOPICS[0]));
    assert_eq!(article.article_type, "vlog");
    assert_eq!(article.title, "Fresh Angle");
    assert_eq!(article.id, 7);

    let requests = ai.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let prompt = body["messages"][1]["content"].as_str().unwrap();
    assert!(prompt.contains(VLOG_TOPICS[0]));
    assert!(prompt.contains("- Title: \"Old vlog 6\" | Topic: "));
}

#[tokio::test]
async fn test_generation_failure_stores_nothing() {
    let ai = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&ai)
        .await;

    let (ctx, _dir) = context(&ai).await;
    assert!(run_vlog(&ctx).await.is_err());
    assert!(ctx.store.get_all().await.is_empty());
}

#[tokio::test]
async fn test_every_topic_used_falls_back_to_full_list() {
    let ai = MockServer::start().await;
    let (ctx, _dir) = context(&ai).await;
    for topic in VLOG_TOPICS {
        seed_vlog(&ctx, topic, topic).await;
    }

    let articles = ctx.store.get_all().await;
    let mut rng = SmallRng::seed_from_u64(11);
    for _ in 0..20 {
        assert!(VLOG_TOPICS.contains(&pick_next_vlog_topic(&articles, &mut rng)));
    }

    let digest = build_prior_vlogs_digest(&articles, 10);
    assert_eq!(digest.lines().count(), VLOG_TOPICS.len());
}

#[tokio::test]
async fn test_seeded_picks_never_repeat_a_used_topic() {
    let ai = MockServer::start().await;
    let (ctx, _dir) = context(&ai).await;
    // Every other topic used, the rest still fresh
    let used: Vec<&str> = VLOG_TOPICS.iter().copied().step_by(2).collect();
    for topic in &used {
        seed_vlog(&ctx, topic, topic).await;
    }
    // Non-vlog articles with a topic do not count as used
    ctx.store
        .add_article(NewArticle {
            title: "Round-up".to_string(),
            content: "body".to_string(),
            article_type: Some("roundup".to_string()),
            topic: Some(VLOG_TOPICS[1].to_string()),
            ..NewArticle::default()
        })
        .await
        .unwrap();

    let articles = ctx.store.get_all().await;
    let mut rng = SmallRng::seed_from_u64(2024);
    let picked: HashSet<&str> = (0..200)
        .map(|_| pick_next_vlog_topic(&articles, &mut rng))
        .collect();

    let fresh: HashSet<&str> = VLOG_TOPICS
        .iter()
        .copied()
        .filter(|t| !used.contains(t))
        .collect();
    assert!(fresh.len() > 1);
    assert_eq!(picked, fresh);
}
