//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::schema::{GatewayConfig, NotifyConfig};
use crate::config::validation::{validate_gateway_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn parse_file<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load and validate gateway configuration from a TOML file.
pub fn load_gateway_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let config: GatewayConfig = parse_file(path)?;
    validate_gateway_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load notification service configuration from a TOML file.
pub fn load_notify_config(path: &Path) -> Result<NotifyConfig, ConfigError> {
    parse_file(path)
}
