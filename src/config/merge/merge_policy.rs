//! Merge rules: defaults first, later sources override earlier ones key by key.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("provider.provider_type", "gemini")?
        .set_default("kitchen.language", "English")?
        .set_default("kitchen.word_count", 500)?
        .set_default("export.title", "Shopping List")?
        .set_default("export.jpeg_quality", 90)?
        .set_default("session.store_path", ".flavour/session")
}
