//! Carrier integration: the tracking API client and status resolution.
//!
//! The client issues one fresh lookup per call. Resolution of "latest" and
//! "delivered" lives in [`status`] as pure functions over the returned
//! event sequence.

pub mod client;
pub mod error;
pub mod status;
pub mod types;

pub use client::{CarrierClient, TrackingProvider, DEFAULT_TRACK_URL};
pub use error::CarrierError;
pub use status::{is_delivered, latest};
pub use types::{TrackResponse, TrackingEvent};
