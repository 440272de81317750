//! Application configuration loading.
//!
//! Config is a small JSON file. The carrier token can be given directly or
//! through an environment variable reference, resolved in that order, so the
//! file itself does not have to contain the credential.

use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::carrier::DEFAULT_TRACK_URL;
use crate::error::ConfigError;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub version: String,

    /// Default carrier API token, used when an owner has no override.
    #[serde(default)]
    pub carrier_token: Option<String>,

    /// Name of an environment variable holding the carrier token.
    #[serde(default)]
    pub carrier_token_env: Option<String>,

    /// Carrier track endpoint. Overridable for staging setups.
    #[serde(default = "default_track_url")]
    pub carrier_track_url: String,

    /// Database file location. Falls back to the canonical per-user path.
    #[serde(default)]
    pub database_path: Option<PathBuf>,
}

fn default_track_url() -> String {
    DEFAULT_TRACK_URL.to_string()
}

impl Config {
    /// Resolves the default carrier token: direct value first, then the
    /// referenced environment variable.
    pub fn resolve_carrier_token(&self) -> Result<SecretString, ConfigError> {
        if let Some(ref token) = self.carrier_token {
            if !token.is_empty() {
                return Ok(SecretString::from(token.clone()));
            }
        }
        if let Some(ref name) = self.carrier_token_env {
            return match std::env::var(name) {
                Ok(value) => Ok(SecretString::from(value)),
                Err(_) => Err(ConfigError::Validation {
                    message: format!("Environment variable '{}' is not set", name),
                }),
            };
        }
        Err(ConfigError::Validation {
            message: "No carrier token configured (need carrier_token or carrier_token_env)"
                .to_string(),
        })
    }
}

/// Loads and validates a config file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

/// Parses and validates a config from its JSON text.
pub fn load_config_from_str(content: &str) -> Result<Config, ConfigError> {
    let config: Config = serde_json::from_str(content)?;

    validate_config(&config)?;

    Ok(config)
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.version != "1.0" {
        return Err(ConfigError::Validation {
            message: format!("Unsupported config version: {}", config.version),
        });
    }

    if config.carrier_token.is_none() && config.carrier_token_env.is_none() {
        return Err(ConfigError::Validation {
            message: "One of carrier_token or carrier_token_env is required".to_string(),
        });
    }

    if config.carrier_track_url.is_empty() {
        return Err(ConfigError::Validation {
            message: "carrier_track_url must not be empty".to_string(),
        });
    }

    Ok(())
}
