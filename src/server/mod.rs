//! HTTP surface: article reads, standings proxy and the dashboard.

pub mod error;
pub mod handlers;

use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app::AppContext;

pub use error::ApiError;

/// Builds the router with open CORS and request tracing.
pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/articles", get(handlers::list_articles))
        .route("/articles/{id}", get(handlers::get_article))
        .route("/standings", get(handlers::get_standings))
        .route("/dashboard", get(handlers::dashboard))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::articles::NewArticle;
    use crate::config::Config;
    use crate::data_fetcher::api::http_client::create_test_http_client;
    use serde_json::{Value, json};
    use tempfile::TempDir;
    use tokio::net::TcpListener;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn serve(rugby_base: &str) -> (String, Arc<AppContext>, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            rugby_api_base_url: rugby_base.to_string(),
            rugby_api_key: Some("test-key".to_string()),
            data_file: dir.path().join("articles.json").to_string_lossy().to_string(),
            ..Config::default()
        };
        let ctx = Arc::new(AppContext::new(config).await.unwrap());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(Arc::clone(&ctx));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}"), ctx, dir)
    }

    #[tokio::test]
    async fn test_root_and_cors() {
        let (base, _ctx, _dir) = serve("http://127.0.0.1:9").await;
        let response = create_test_http_client()
            .get(format!("{base}/"))
            .header("Origin", "http://localhost:3000")
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({"status": "ok", "source": "Rugby AI backend"}));
    }

    #[tokio::test]
    async fn test_articles_list_and_lookup() {
        let (base, ctx, _dir) = serve("http://127.0.0.1:9").await;
        let stored = ctx
            .store
            .add_article(NewArticle::new("First", "Body"))
            .await
            .unwrap();
        let client = create_test_http_client();

        let list: Vec<Value> = client
            .get(format!("{base}/articles"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["type"], "generic");

        let one = client
            .get(format!("{base}/articles/{}", stored.id))
            .send()
            .await
            .unwrap();
        assert_eq!(one.status(), 200);

        for missing in ["999", "abc"] {
            let response = client
                .get(format!("{base}/articles/{missing}"))
                .send()
                .await
                .unwrap();
            assert_eq!(response.status(), 404);
            let body: Value = response.json().await.unwrap();
            assert_eq!(body, json!({"error": "Article not found"}));
        }
    }

    #[tokio::test]
    async fn test_standings_route() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/standings"))
            .and(query_param("league", "16"))
            .and(query_param("season", "2022"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": [[
                    {"position": 1, "team": {"name": "Toulouse", "logo": "t.png"},
                     "games": {"played": 26, "win": {"total": 18}, "lose": {"total": 7}},
                     "points": 85}
                ]]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let (base, _ctx, _dir) = serve(&mock_server.uri()).await;
        let client = create_test_http_client();

        let body: Value = client
            .get(format!("{base}/standings?league=top14"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["league"], "top14");
        assert_eq!(body["season"], 2022);
        assert_eq!(body["table"][0]["team"], "Toulouse");

        // Served from cache the second time
        let again = client
            .get(format!("{base}/standings?league=TOP14&season=2022"))
            .send()
            .await
            .unwrap();
        assert_eq!(again.status(), 200);
    }

    #[tokio::test]
    async fn test_standings_errors() {
        let (base, _ctx, _dir) = serve("http://127.0.0.1:9").await;
        let client = create_test_http_client();

        let missing = client.get(format!("{base}/standings")).send().await.unwrap();
        assert_eq!(missing.status(), 400);

        let bad_season = client
            .get(format!("{base}/standings?league=TOP14&season=abc"))
            .send()
            .await
            .unwrap();
        assert_eq!(bad_season.status(), 400);

        let unknown = client
            .get(format!("{base}/standings?league=PRO_D2"))
            .send()
            .await
            .unwrap();
        assert_eq!(unknown.status(), 500);
        let body: Value = unknown.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("PRO_D2"));
    }

    #[tokio::test]
    async fn test_standings_provider_failure_is_bad_gateway() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/standings"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let (base, _ctx, _dir) = serve(&mock_server.uri()).await;
        let response = create_test_http_client()
            .get(format!("{base}/standings?league=URC"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 502);
    }

    #[tokio::test]
    async fn test_dashboard_renders_when_standings_fail() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/standings"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let (base, ctx, _dir) = serve(&mock_server.uri()).await;
        ctx.store
            .add_article(NewArticle::new("Hello <world>", "Line one\nLine two"))
            .await
            .unwrap();

        let response = create_test_http_client()
            .get(format!("{base}/dashboard?standings=URC"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let html = response.text().await.unwrap();
        assert!(html.contains("Hello &lt;world&gt;"));
        assert!(html.contains("United Rugby Championship"));
        assert!(html.contains("Standings not available."));
    }

    #[tokio::test]
    async fn test_dashboard_carousel_skips_leagues_without_standings() {
        let mock_server = MockServer::start().await;
        for (league_id, team) in [("76", "Leinster"), ("51", "Ireland")] {
            Mock::given(method("GET"))
                .and(path("/standings"))
                .and(query_param("league", league_id))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "response": [[{"position": 1, "team": {"name": team}, "points": 40}]]
                })))
                .expect(1)
                .mount(&mock_server)
                .await;
        }
        Mock::given(method("GET"))
            .and(path("/standings"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let (base, _ctx, _dir) = serve(&mock_server.uri()).await;
        let client = create_test_http_client();

        // Top 14 has no table: its neighbours are the nearest leagues that do
        let html = client
            .get(format!("{base}/dashboard"))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(html.contains("Standings not available."));
        assert!(html.contains("standings=URC"));
        assert!(html.contains("standings=SIX_NATIONS"));
        assert!(!html.contains("standings=PREMIERSHIP"));

        // Second load is served from the standings cache
        let html = client
            .get(format!("{base}/dashboard?standings=URC&full=1"))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(html.contains("United Rugby Championship – Full Standings"));
        assert!(html.contains("Leinster"));
        assert!(html.contains("standings=SIX_NATIONS&amp;full=1"));
    }
}
