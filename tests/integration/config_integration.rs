//! Layered configuration loading.

use super::test_utils::with_isolated_env;
use flavour_fusion::config::{ConfigLoader, ProviderType, ValidationError};
use flavour_fusion::export::OverflowPolicy;
use flavour_fusion::kitchen::JokeSource;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_defaults_without_any_files() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_env(&test_dir, || {
        let workspace = test_dir.path().join("ws");
        fs::create_dir_all(&workspace).unwrap();

        let config = ConfigLoader::load(&workspace).unwrap();
        assert_eq!(config.provider.provider_type, ProviderType::Gemini);
        assert_eq!(config.provider.model, "gemini-1.5-flash");
        assert_eq!(config.kitchen.jokes, JokeSource::Canned);
        assert_eq!(config.export.overflow, OverflowPolicy::Paginate);
        assert_eq!(config.logging.level, "warn");
        assert!(config.validate().is_ok());
    });
}

#[test]
fn test_user_file_then_workspace_file() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_env(&test_dir, || {
        let user_dir = test_dir.path().join("xdg_config").join("flavour");
        fs::create_dir_all(&user_dir).unwrap();
        fs::write(
            user_dir.join("config.toml"),
            r#"
[provider]
provider_type = "ollama"
model = "mistral"

[export]
jpeg_quality = 70
"#,
        )
        .unwrap();

        let workspace = test_dir.path().join("ws");
        fs::create_dir_all(workspace.join("config")).unwrap();
        fs::write(
            workspace.join("config").join("config.toml"),
            r#"
[export]
title = "Groceries"
"#,
        )
        .unwrap();

        let config = ConfigLoader::load(&workspace).unwrap();
        assert_eq!(config.provider.provider_type, ProviderType::Ollama);
        assert_eq!(config.provider.model, "mistral");
        assert_eq!(config.export.jpeg_quality, 70);
        assert_eq!(config.export.title, "Groceries");
    });
}

#[test]
fn test_explicit_file_replaces_layers() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_env(&test_dir, || {
        let user_dir = test_dir.path().join("xdg_config").join("flavour");
        fs::create_dir_all(&user_dir).unwrap();
        fs::write(user_dir.join("config.toml"), "[kitchen]\nlanguage = \"Japanese\"\n").unwrap();

        let explicit = test_dir.path().join("custom.toml");
        fs::write(&explicit, "[kitchen]\nword_count = 300\n").unwrap();

        let config = ConfigLoader::load_from_file(&explicit).unwrap();
        assert_eq!(config.kitchen.word_count, 300);
        assert_eq!(config.kitchen.language, "English");
    });
}

#[test]
fn test_invalid_toml_is_an_error() {
    let test_dir = TempDir::new().unwrap();
    let explicit = test_dir.path().join("broken.toml");
    fs::write(&explicit, "[kitchen\nlanguage = ").unwrap();
    assert!(ConfigLoader::load_from_file(&explicit).is_err());
}

#[test]
fn test_validation_reports_provider_problems() {
    let test_dir = TempDir::new().unwrap();
    let explicit = test_dir.path().join("bad.toml");
    fs::write(
        &explicit,
        r#"
[provider]
model = "gemini-1.5-flash"
endpoint = "ftp://example.com"
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&explicit).unwrap();
    let errors = config.validate().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], ValidationError::Provider(_)));
}
