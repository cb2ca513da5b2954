//! Ollama client (local models) over its OpenAI-compatible chat endpoint.

use super::{
    build_provider_http_client, error_from_response, map_http_error, GenerationOptions,
    TextGenerator,
};
use crate::error::{FlavourError, GenerationError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default model
pub const DEFAULT_MODEL: &str = "llama3";

const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Loopback endpoints are reached directly; anything else goes through configured proxies.
fn is_loopback(base_url: &str) -> bool {
    reqwest::Url::parse(base_url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .map(|host| matches!(host.as_str(), "localhost" | "127.0.0.1" | "[::1]" | "::1"))
        .unwrap_or(false)
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

/// Ollama provider client
pub struct OllamaClient {
    client: Client,
    model: String,
    base_url: String,
    options: GenerationOptions,
}

impl OllamaClient {
    pub fn new(
        model: String,
        base_url: Option<String>,
        options: GenerationOptions,
    ) -> Result<Self, FlavourError> {
        let base_url = base_url
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let client = build_provider_http_client(is_loopback(&base_url))?;

        Ok(Self {
            client,
            model,
            base_url,
            options,
        })
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.options.temperature,
            max_tokens: self.options.max_output_tokens,
            stream: false,
        };

        let url = format!("{}/v1/chat/completions", self.base_url);
        debug!(model = %self.model, prompt_chars = prompt.len(), "Sending Ollama request");
        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(map_http_error)?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(text)
    }

    fn provider_name(&self) -> &str {
        "ollama"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
