//! Workspace layer: `<workspace>/config/config.toml`, then `config/{FLAVOUR_ENV}.toml`

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};
use std::path::{Path, PathBuf};
use tracing::debug;

const DEFAULT_ENV: &str = "development";

/// Environment name selecting the second workspace file; blank means the default.
fn env_name() -> String {
    std::env::var("FLAVOUR_ENV")
        .ok()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_ENV.to_string())
}

/// Workspace config files in merge order. Later files win.
pub fn candidate_paths(workspace_root: &Path) -> [PathBuf; 2] {
    let config_dir = workspace_root.join("config");
    [
        config_dir.join("config.toml"),
        config_dir.join(format!("{}.toml", env_name())),
    ]
}

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let mut builder = builder;
    for path in candidate_paths(workspace_root) {
        if !path.exists() {
            continue;
        }
        debug!(config_path = %path.display(), "Loading workspace configuration");
        builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
    }
    Ok(builder)
}
