//! Text-Generation Client
//!
//! The oracle behind every feature: a prompt goes in, completion text comes out.
//! Hosted Gemini and local Ollama models sit behind one [`TextGenerator`] trait so
//! the kitchen actions never depend on a concrete provider.

use crate::error::{FlavourError, GenerationError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub mod fake;
pub mod gemini;
pub mod ollama;
pub mod profile;

pub use fake::FakeGenerator;
pub use gemini::GeminiClient;
pub use ollama::OllamaClient;
pub use profile::{GenerationOptions, ProviderConfig, ProviderType};

/// Model provider client trait
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send one prompt and return the completion text.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Get the provider name
    fn provider_name(&self) -> &str;

    /// Get the model name
    fn model_name(&self) -> &str;
}

// Helper function to map transport errors to GenerationError
fn map_http_error(error: reqwest::Error) -> GenerationError {
    if let Some(status) = error.status() {
        map_status(status.as_u16(), error.to_string())
    } else if error.is_timeout() {
        GenerationError::RequestFailed(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        GenerationError::RequestFailed(format!("Connection error: {}", error))
    } else {
        GenerationError::RequestFailed(format!("HTTP error: {}", error))
    }
}

// Helper function to map a non-success HTTP status to GenerationError
fn map_status(status: u16, error_text: String) -> GenerationError {
    match status {
        400 => GenerationError::MalformedRequest(error_text),
        401 | 403 => GenerationError::Unauthorized(error_text),
        404 => GenerationError::ModelNotFound(error_text),
        429 => GenerationError::RateLimited(error_text),
        _ => GenerationError::RequestFailed(format!(
            "Request failed with status {}: {}",
            status, error_text
        )),
    }
}

async fn error_from_response(response: reqwest::Response) -> GenerationError {
    let status = response.status().as_u16();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    map_status(status, error_text)
}

const PROVIDER_HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const PROVIDER_HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Shared client settings. `direct` skips system and `HTTPS_PROXY` proxies, for
/// local model servers only.
fn build_provider_http_client(direct: bool) -> Result<Client, FlavourError> {
    let mut builder = Client::builder()
        .connect_timeout(PROVIDER_HTTP_CONNECT_TIMEOUT)
        .timeout(PROVIDER_HTTP_REQUEST_TIMEOUT);
    if direct {
        builder = builder.no_proxy();
    }
    builder
        .build()
        .map_err(|e| FlavourError::Config(format!("Failed to create HTTP client: {}", e)))
}

/// Builds the configured client.
pub struct ProviderFactory;

impl ProviderFactory {
    /// A Gemini provider without a resolvable API key is a fatal startup condition.
    pub fn create_client(config: &ProviderConfig) -> Result<Box<dyn TextGenerator>, FlavourError> {
        match config.provider_type {
            ProviderType::Gemini => {
                let api_key = config.resolve_api_key().ok_or(FlavourError::MissingApiKey {
                    env_var: gemini::GEMINI_API_KEY_ENV,
                })?;
                Ok(Box::new(GeminiClient::new(
                    config.model.clone(),
                    api_key,
                    config.endpoint.clone(),
                    config.options.clone(),
                )?))
            }
            ProviderType::Ollama => Ok(Box::new(OllamaClient::new(
                config.model.clone(),
                config.endpoint.clone(),
                config.options.clone(),
            )?)),
        }
    }
}
