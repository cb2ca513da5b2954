//! Fake oracle for tests.
//!
//! Responses are matched by checking whether the prompt contains a registered
//! substring, in registration order. Every prompt is recorded so tests can assert
//! how many oracle calls an action made.

use super::TextGenerator;
use crate::error::GenerationError;
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct FakeGenerator {
    responses: Vec<(String, Result<String, GenerationError>)>,
    default_response: Option<Result<String, GenerationError>>,
    prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    /// No registered responses; every prompt fails with `EmptyResponse`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every prompt with the same text.
    pub fn answering(text: &str) -> Self {
        Self::new().with_default_response(text)
    }

    /// Fail every prompt with the given error.
    pub fn failing(error: GenerationError) -> Self {
        Self {
            default_response: Some(Err(error)),
            ..Self::default()
        }
    }

    pub fn with_response(mut self, prompt_contains: &str, response: &str) -> Self {
        self.responses
            .push((prompt_contains.to_string(), Ok(response.to_string())));
        self
    }

    pub fn with_failure(mut self, prompt_contains: &str, error: GenerationError) -> Self {
        self.responses.push((prompt_contains.to_string(), Err(error)));
        self
    }

    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(Ok(response.to_string()));
        self
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(prompt.to_string());

        self.responses
            .iter()
            .find(|(pattern, _)| prompt.contains(pattern.as_str()))
            .map(|(_, response)| response.clone())
            .or_else(|| self.default_response.clone())
            .unwrap_or(Err(GenerationError::EmptyResponse))
    }

    fn provider_name(&self) -> &str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}
