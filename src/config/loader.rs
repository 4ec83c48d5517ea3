//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable that supplies the provider key when the file has none.
pub const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ServiceConfig = toml::from_str(&content)?;
    finalize(config, |name| std::env::var(name).ok())
}

/// Validate a configuration built without a file (defaults plus environment).
pub fn load_from_env() -> Result<ServiceConfig, ConfigError> {
    finalize(ServiceConfig::default(), |name| std::env::var(name).ok())
}

fn finalize<F>(mut config: ServiceConfig, env: F) -> Result<ServiceConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    apply_env_overrides(&mut config, env);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Fill values the file left empty from the environment.
///
/// A key set in the file always wins over the environment.
pub fn apply_env_overrides<F>(config: &mut ServiceConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    if config.maps.api_key.trim().is_empty() {
        if let Some(key) = env(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            config.maps.api_key = key;
        }
    }
}
