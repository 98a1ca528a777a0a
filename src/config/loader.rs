//! Loading options from disk.

use std::fs;
use std::path::Path;

use crate::config::validation::ValidationError;
use crate::handler::Options;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Options are not representable: {0}")]
    Convert(#[from] serde_json::Error),
    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Read a TOML file whose top-level table becomes the options mapping.
pub fn load_options(path: &Path) -> Result<Options, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_options(&content)
}

/// Parse TOML text into an options mapping.
pub fn parse_options(content: &str) -> Result<Options, ConfigError> {
    let table: toml::Table = toml::from_str(content)?;
    match serde_json::to_value(table)? {
        serde_json::Value::Object(options) => Ok(options),
        // A TOML document is always a table.
        _ => Ok(Options::new()),
    }
}
