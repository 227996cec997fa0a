use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

const TEMPERATURE: f32 = 0.3;

/// A text completion backend for quiz prompts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> AppResult<String>;
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat completions against any OpenAI-compatible endpoint (Groq by default).
pub struct OpenAiQuizModel {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiQuizModel {
    /// Returns `None` when no API key is configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        let api_key = config.llm_api_key.as_ref()?;
        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key.expose_secret())
            .with_api_base(&config.llm_api_base);

        Some(Self {
            client: Client::with_config(openai_config),
            model: config.llm_model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl QuizModel for OpenAiQuizModel {
    async fn complete(&self, prompt: &str) -> AppResult<String> {
        log::debug!("Requesting completion from model {}", self.model);

        let reply: ChatReply = self
            .client
            .chat()
            .create_byot(serde_json::json!({
                "model": self.model,
                "temperature": TEMPERATURE,
                "messages": [
                    { "role": "user", "content": prompt }
                ]
            }))
            .await?;

        first_completion(reply)
    }
}

fn first_completion(reply: ChatReply) -> AppResult<String> {
    reply
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| AppError::ModelError("Model returned an empty completion".to_string()))
}
