//! Flavour Fusion: AI-driven recipe generation
//!
//! Builds recipe prompts from user options, sends them to a text-generation
//! provider, keeps the latest results in a per-workspace session, and renders the
//! derived shopping list into a PDF document or a PNG/JPEG image.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod kitchen;
pub mod logging;
pub mod prompt;
pub mod provider;
pub mod session;
pub mod ui_text;
