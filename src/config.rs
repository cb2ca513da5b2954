//! Configuration System
//!
//! Layered TOML configuration: merge-policy defaults, then the user file, then the
//! workspace files. An explicit `--config` file replaces the file layers.

use crate::kitchen::JokeSource;
use crate::logging::LoggingConfig;
use crate::prompt::{DEFAULT_WORD_COUNT, WORD_COUNT_RANGE};
use config::{ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub use crate::export::ExportSettings;
pub use crate::provider::{ProviderConfig, ProviderType};

mod merge {
    pub mod merge_policy;
}

mod sources {
    pub mod global_file;
    pub mod workspace_file;
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlavourConfig {
    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub kitchen: KitchenConfig,

    #[serde(default)]
    pub export: ExportSettings,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[kitchen]` section: defaults for user actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KitchenConfig {
    /// Default language for recipes and chef answers
    pub language: String,
    pub word_count: u32,
    pub jokes: JokeSource,
    pub include_nutrition: bool,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self {
            language: "English".to_string(),
            word_count: DEFAULT_WORD_COUNT,
            jokes: JokeSource::default(),
            include_nutrition: true,
        }
    }
}

/// `[session]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Relative paths resolve against the workspace root
    pub store_path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(".flavour/session"),
        }
    }
}

impl SessionConfig {
    pub fn resolve(&self, workspace_root: &Path) -> PathBuf {
        if self.store_path.is_absolute() {
            self.store_path.clone()
        } else {
            workspace_root.join(&self.store_path)
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Provider(String),
    Kitchen(String),
    Export(String),
    Session(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Provider(msg) => write!(f, "Provider: {}", msg),
            ValidationError::Kitchen(msg) => write!(f, "Kitchen: {}", msg),
            ValidationError::Export(msg) => write!(f, "Export: {}", msg),
            ValidationError::Session(msg) => write!(f, "Session: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl KitchenConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.language.trim().is_empty() {
            return Err("Language cannot be empty".to_string());
        }
        if !WORD_COUNT_RANGE.contains(&self.word_count) {
            return Err(format!(
                "Word count must be between {} and {}, got {}",
                WORD_COUNT_RANGE.start(),
                WORD_COUNT_RANGE.end(),
                self.word_count
            ));
        }
        Ok(())
    }
}

fn validate_export(export: &ExportSettings) -> Result<(), String> {
    if !(1..=100).contains(&export.jpeg_quality) {
        return Err(format!(
            "JPEG quality must be between 1 and 100, got {}",
            export.jpeg_quality
        ));
    }
    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Vec<String> {
    let mut problems = Vec::new();
    const LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];
    if !LEVELS.contains(&logging.level.to_lowercase().as_str()) {
        problems.push(format!("Unknown log level '{}'", logging.level));
    }
    if !matches!(logging.format.to_lowercase().as_str(), "text" | "json") {
        problems.push(format!("Unknown log format '{}'", logging.format));
    }
    if !matches!(
        logging.output.to_lowercase().as_str(),
        "stdout" | "stderr" | "file"
    ) {
        problems.push(format!("Unknown log output '{}'", logging.output));
    }
    problems
}

impl FlavourConfig {
    /// Validate the entire configuration, collecting every problem.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.provider.validate() {
            errors.push(ValidationError::Provider(e));
        }
        if let Err(e) = self.kitchen.validate() {
            errors.push(ValidationError::Kitchen(e));
        }
        if let Err(e) = validate_export(&self.export) {
            errors.push(ValidationError::Export(e));
        }
        if self.session.store_path.as_os_str().is_empty() {
            errors.push(ValidationError::Session(
                "Store path cannot be empty".to_string(),
            ));
        }
        errors.extend(
            validate_logging(&self.logging)
                .into_iter()
                .map(ValidationError::Logging),
        );

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Builds [`FlavourConfig`] from the layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, then the user file, then the workspace files.
    pub fn load(workspace_root: &Path) -> Result<FlavourConfig, ConfigError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::workspace_file::add_to_builder(builder, workspace_root)?;
        let config: FlavourConfig = builder.build()?.try_deserialize()?;
        debug!(
            workspace = %workspace_root.display(),
            provider = config.provider.provider_type.as_str(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Defaults plus exactly one file; user and workspace files are ignored.
    pub fn load_from_file(path: &Path) -> Result<FlavourConfig, ConfigError> {
        merge::merge_policy::builder_with_defaults()?
            .add_source(File::from(path).format(FileFormat::Toml).required(true))
            .build()?
            .try_deserialize()
    }

    /// Location of the user-level config file.
    pub fn global_config_path() -> Option<PathBuf> {
        sources::global_file::global_config_path()
    }
}
