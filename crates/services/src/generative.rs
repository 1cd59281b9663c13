use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use training_core::model::GeneratorSettings;

use crate::error::GenerativeError;

/// The hosted model boundary: one prompt in, free-form text out.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Generate text from a prompt.
    ///
    /// # Errors
    ///
    /// Returns `GenerativeError` when the service is unavailable, rejects the
    /// request, or replies with nothing.
    async fn generate(&self, prompt: &str) -> Result<String, GenerativeError>;
}

/// OpenAI-compatible `chat/completions` client.
#[derive(Clone)]
pub struct ChatCompletionsClient {
    client: Client,
    settings: Option<GeneratorSettings>,
    temperature: f32,
}

impl ChatCompletionsClient {
    /// Build a client; `None` leaves it disabled so every call reports `Disabled`.
    #[must_use]
    pub fn new(settings: Option<GeneratorSettings>) -> Self {
        Self {
            client: Client::new(),
            settings,
            temperature: 0.7,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.settings.is_some()
    }
}

#[async_trait]
impl GenerativeModel for ChatCompletionsClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerativeError> {
        let settings = self.settings.as_ref().ok_or(GenerativeError::Disabled)?;

        let url = format!("{}/chat/completions", settings.base_url());
        let payload = ChatRequest {
            model: settings.model().to_string(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt.to_string(),
            }],
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(settings.api_key())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        read_chat_response(status, &body)
    }
}

/// Turn a `chat/completions` HTTP reply into the first choice's text.
fn read_chat_response(status: StatusCode, body: &str) -> Result<String, GenerativeError> {
    if !status.is_success() {
        return Err(GenerativeError::HttpStatus(status));
    }

    let body: ChatResponse = serde_json::from_str(body)?;
    body.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or(GenerativeError::EmptyResponse)
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}
