//! Service-surface error types.
//!
//! This is the taxonomy the transport layer relays to the client: a failed
//! call carries one of these kinds, so callers branch on the variant rather
//! than on message text.

use thiserror::Error;

use crate::carrier::CarrierError;
use crate::db::DatabaseError;

/// Errors surfaced by dashboard operations.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The parcel does not exist or does not belong to the caller.
    #[error("Parcel {id} not found")]
    ParcelNotFound { id: i64 },

    /// The carrier lookup failed; no state was changed.
    #[error("Tracking fetch failed: {0}")]
    TrackingFetch(#[from] CarrierError),

    /// No backing store is attached; mutations cannot proceed.
    #[error("Persistence unavailable")]
    PersistenceUnavailable,

    /// The backing store reported an error.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

/// Result type for dashboard operations.
pub type Result<T> = std::result::Result<T, ApiError>;
