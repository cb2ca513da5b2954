//! Provider profile: which model to call and how.

use serde::{Deserialize, Serialize};

/// Supported oracle backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    Gemini,
    Ollama,
}

impl ProviderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderType::Gemini => "gemini",
            ProviderType::Ollama => "ollama",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderType::Gemini => super::gemini::DEFAULT_MODEL,
            ProviderType::Ollama => super::ollama::DEFAULT_MODEL,
        }
    }

    /// Environment variable consulted when no key is configured.
    pub fn api_key_env_var(&self) -> Option<&'static str> {
        match self {
            ProviderType::Gemini => Some(super::gemini::GEMINI_API_KEY_ENV),
            ProviderType::Ollama => None,
        }
    }
}

/// Sampling options forwarded to the provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>, // 0.0-2.0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

/// `[provider]` configuration section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_provider_type")]
    pub provider_type: ProviderType,

    #[serde(default = "default_model")]
    pub model: String,

    /// Overrides the provider's API key environment variable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Custom base URL (tests, proxies, remote Ollama hosts)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    #[serde(default)]
    pub options: GenerationOptions,
}

fn default_provider_type() -> ProviderType {
    ProviderType::Gemini
}

fn default_model() -> String {
    ProviderType::Gemini.default_model().to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: default_provider_type(),
            model: default_model(),
            api_key: None,
            endpoint: None,
            options: GenerationOptions::default(),
        }
    }
}

impl ProviderConfig {
    /// Configured key first, then the provider's environment variable. Blank values count as absent.
    pub fn resolve_api_key(&self) -> Option<String> {
        let configured = self
            .api_key
            .as_ref()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        configured.or_else(|| {
            self.provider_type
                .api_key_env_var()
                .and_then(|var| std::env::var(var).ok())
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty())
        })
    }

    /// Validate provider configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("Model name cannot be empty".to_string());
        }

        if let Some(endpoint) = &self.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(format!(
                    "Endpoint must be an http(s) URL, got '{}'",
                    endpoint
                ));
            }
        }

        if let Some(temperature) = self.options.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(format!(
                    "Temperature must be between 0.0 and 2.0, got {}",
                    temperature
                ));
            }
        }

        Ok(())
    }
}
