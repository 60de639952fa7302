//! Article generation through a chat-completion provider.

pub mod client;
pub mod parsing;
pub mod prompts;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::config::Config;
use crate::error::AppError;

pub use client::ChatClient;
pub use parsing::parse_generated_text;

/// Title and body produced by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedArticle {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct ArticleGenerator {
    chat: ChatClient,
}

impl ArticleGenerator {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            chat: ChatClient::new(client, config),
        }
    }

    /// Writes a weekly round-up from a rendered summary.
    #[instrument(skip(self, summary_text))]
    pub async fn generate_roundup_article(
        &self,
        summary_text: &str,
    ) -> Result<GeneratedArticle, AppError> {
        let raw = self
            .chat
            .complete(
                prompts::ROUNDUP_SYSTEM_PROMPT,
                &prompts::roundup_user_prompt(summary_text),
            )
            .await?;
        let article = parse_generated_text(&raw);
        info!("Generated round-up '{}' with {}", article.title, self.chat.model());
        Ok(article)
    }

    /// Writes an opinion piece on `topic`, steered away from the listed prior vlogs.
    #[instrument(skip(self, prior_vlogs_digest))]
    pub async fn generate_vlog_article(
        &self,
        topic: &str,
        prior_vlogs_digest: &str,
    ) -> Result<GeneratedArticle, AppError> {
        let raw = self
            .chat
            .complete(
                prompts::VLOG_SYSTEM_PROMPT,
                &prompts::vlog_user_prompt(topic, prior_vlogs_digest),
            )
            .await?;
        let article = parse_generated_text(&raw);
        info!("Generated vlog '{}' with {}", article.title, self.chat.model());
        Ok(article)
    }
}
