//! Minimal client for an OpenAI-compatible chat-completion endpoint.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::Config;
use crate::constants::env_vars;
use crate::data_fetcher::api::build_chat_completions_url;
use crate::data_fetcher::api::fetch_utils::{map_request_error, read_json_response};
use crate::error::AppError;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ChatClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl ChatClient {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            endpoint: build_chat_completions_url(&config.ai_api_base_url),
            api_key: config.ai_api_key.clone(),
            model: config.ai_model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends one system/user exchange and returns the first choice's text.
    ///
    /// An empty `choices` array or a missing `content` yields an empty string;
    /// callers fall back to fixed text in that case.
    #[instrument(skip(self, system_prompt, user_prompt), fields(model = %self.model))]
    pub async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, AppError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(AppError::config_error(format!(
                "{} is not set; cannot call the text-generation provider",
                env_vars::AI_API_KEY
            )));
        };

        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        info!("Requesting completion from {}", self.endpoint);
        debug!("Prompt length: {} chars", user_prompt.len());

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| map_request_error(e, &self.endpoint))?;

        let chat: ChatResponse = read_json_response(response, &self.endpoint).await?;

        match chat.choices.into_iter().next() {
            Some(choice) => Ok(choice.message.content.unwrap_or_default()),
            None => {
                warn!("Completion from {} returned no choices", self.endpoint);
                Ok(String::new())
            }
        }
    }
}
