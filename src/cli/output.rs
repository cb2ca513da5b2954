//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::FlavourError;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &FlavourError) -> String {
    match e {
        FlavourError::MissingInput(message) => message.clone(),
        FlavourError::MissingApiKey { .. } | FlavourError::Config(_) => e.to_string(),
        other => format!("Error: {}", other),
    }
}

/// Exit status for a failed command: warnings are not failures.
pub fn exit_code(e: &FlavourError) -> i32 {
    if e.is_warning() {
        0
    } else {
        1
    }
}
