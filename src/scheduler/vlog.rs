//! Weekly vlog trigger: an opinion piece on a topic not covered yet.

use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::HashSet;
use tracing::{info, instrument};

use crate::app::AppContext;
use crate::articles::{Article, NewArticle};
use crate::constants::generation::PRIOR_VLOG_DIGEST_SIZE;
use crate::error::AppError;

pub const VLOG_ARTICLE_TYPE: &str = "vlog";

pub const VLOG_TOPICS: &[&str] = &[
    "How modern rugby kicking strategies create territorial pressure",
    "Why defense systems have changed so much in the last decade",
    "The evolution of number 10: playmaker, kicker and game manager",
    "URC vs Top 14 vs Premiership: different styles of rugby explained",
    "How data and analytics are changing rugby coaching",
    "Key differences between international rugby and club rugby",
    "Pendulum defense systems and how backfield coverage works",
];

/// Picks uniformly among topics no vlog has used yet, or among all topics
/// once every one has been covered.
pub fn pick_next_vlog_topic<R: Rng + ?Sized>(articles: &[Article], rng: &mut R) -> &'static str {
    let used: HashSet<&str> = articles
        .iter()
        .filter(|a| a.is_vlog())
        .filter_map(|a| a.topic.as_deref())
        .collect();

    let unused: Vec<&'static str> = VLOG_TOPICS
        .iter()
        .copied()
        .filter(|topic| !used.contains(topic))
        .collect();

    unused
        .choose(rng)
        .or_else(|| VLOG_TOPICS.choose(rng))
        .copied()
        .unwrap_or(VLOG_TOPICS[0])
}

/// One line per recent vlog, newest first. `articles` must be newest first.
pub fn build_prior_vlogs_digest(articles: &[Article], max: usize) -> String {
    articles
        .iter()
        .filter(|a| a.is_vlog())
        .take(max)
        .map(|a| {
            format!(
                "- Title: \"{}\" | Topic: {}",
                a.title,
                a.topic.as_deref().unwrap_or("unknown topic")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Generates and stores one vlog article.
#[instrument(skip(ctx))]
pub async fn run_vlog(ctx: &AppContext) -> Result<Article, AppError> {
    let articles = ctx.store.get_all().await;
    let topic = {
        let mut rng = rand::rng();
        pick_next_vlog_topic(&articles, &mut rng)
    };
    let digest = build_prior_vlogs_digest(&articles, PRIOR_VLOG_DIGEST_SIZE);
    info!("Chosen vlog topic: {topic}");

    let generated = ctx.generator.generate_vlog_article(topic, &digest).await?;
    let article = ctx
        .store
        .add_article(NewArticle {
            title: generated.title,
            content: generated.content,
            article_type: Some(VLOG_ARTICLE_TYPE.to_string()),
            topic: Some(topic.to_string()),
            ..NewArticle::default()
        })
        .await?;

    info!("Vlog article saved: {}", article.title);
    Ok(article)
}
