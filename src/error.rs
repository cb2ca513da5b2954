//! Error types for the Flavour Fusion recipe assistant.

use thiserror::Error;

/// Failure of a single oracle call.
///
/// The kitchen layer turns these into feature-scoped fallback text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("Provider authentication failed: {0}")]
    Unauthorized(String),

    #[error("Provider rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("Provider model not found: {0}")]
    ModelNotFound(String),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Provider request failed: {0}")]
    RequestFailed(String),

    #[error("Response blocked by provider: {0}")]
    Blocked(String),

    #[error("Provider returned no text")]
    EmptyResponse,

    #[error("Failed to parse provider response: {0}")]
    InvalidResponse(String),
}

impl GenerationError {
    /// True when retrying the same prompt cannot succeed without changing the request.
    pub fn is_request_problem(&self) -> bool {
        matches!(
            self,
            GenerationError::MalformedRequest(_)
                | GenerationError::ModelNotFound(_)
                | GenerationError::Unauthorized(_)
        )
    }
}

/// Export rendering errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF encoding failed: {0}")]
    Pdf(String),

    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("Surface does not support page {0}")]
    PageUnsupported(usize),

    #[error("Unknown export format: {0}")]
    UnknownFormat(String),
}

/// Session storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Session store error: {0}")]
    Sled(#[from] sled::Error),

    #[error("Corrupt session entry {key}: {message}")]
    Corrupt { key: String, message: String },

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Top-level error for user actions and startup.
#[derive(Debug, Error)]
pub enum FlavourError {
    /// Required input is empty. Reported as a warning; no action is taken.
    #[error("{0}")]
    MissingInput(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("API key not found! Please set {env_var} in the environment or config file.")]
    MissingApiKey { env_var: &'static str },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FlavourError {
    /// Warnings are recovered locally: the caller reports them and carries on.
    pub fn is_warning(&self) -> bool {
        matches!(self, FlavourError::MissingInput(_))
    }
}

impl From<config::ConfigError> for FlavourError {
    fn from(err: config::ConfigError) -> Self {
        FlavourError::Config(err.to_string())
    }
}
