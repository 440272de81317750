use std::path::PathBuf;
use thiserror::Error;

use crate::api::ApiError;
use crate::carrier::CarrierError;

#[derive(Error, Debug)]
pub enum OpsdeckError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Carrier error: {0}")]
    Carrier(#[from] CarrierError),

    #[error("Database error: {0}")]
    Database(#[from] crate::db::DatabaseError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },
}

pub type Result<T> = std::result::Result<T, OpsdeckError>;
