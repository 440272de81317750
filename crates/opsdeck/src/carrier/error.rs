//! Carrier client error types.
//!
//! Every variant represents a failed tracking fetch; callers treat the whole
//! enum as "the lookup did not happen" and never partially apply a result.

use thiserror::Error;

/// Errors from a carrier tracking lookup.
#[derive(Error, Debug)]
pub enum CarrierError {
    /// The HTTP request could not be sent or completed.
    #[error("Tracking request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The carrier answered with a non-success HTTP status.
    #[error("Carrier returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not match the expected shape.
    #[error("Failed to parse carrier response: {0}")]
    Parse(String),
}

/// Result type for carrier operations.
pub type Result<T> = std::result::Result<T, CarrierError>;
