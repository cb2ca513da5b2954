//! Flavour CLI Binary
//!
//! Command-line interface for the Flavour Fusion recipe assistant.

use clap::Parser;
use flavour_fusion::cli::{exit_code, map_error, Cli, RunContext};
use flavour_fusion::config::ConfigLoader;
use flavour_fusion::logging::{default_log_file_path, init_logging, LoggingConfig};
use owo_colors::OwoColorize;
use std::process;
use tracing::{error, info, warn};

fn main() {
    let cli = Cli::parse();

    // Build logging config from CLI args, env vars, and config file
    let logging_config = build_logging_config(&cli);

    // Initialize logging early
    if let Err(e) = init_logging(&logging_config) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Flavour CLI starting");

    let context = match RunContext::new(cli.workspace.clone(), cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error initializing: {}", e);
            eprintln!("{}", map_error(&e).red());
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) if e.is_warning() => {
            warn!("{}", e);
            eprintln!("{}", map_error(&e).yellow());
            process::exit(exit_code(&e));
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e).red());
            process::exit(exit_code(&e));
        }
    }
}

/// Build logging configuration from CLI args, environment, and config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = if let Some(ref config_path) = cli.config {
        ConfigLoader::load_from_file(config_path)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    } else {
        ConfigLoader::load(&cli.workspace)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    };

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }
    if config.enabled && config.output == "file" && config.file.is_none() {
        config.file = default_log_file_path();
    }

    config
}
