//! The typed service surface consumed by the presentation transport.
//!
//! [`Dashboard`] bundles the injected persistence handle and the carrier
//! client; each method corresponds to one remote procedure. Owner ids are
//! opaque, externally verified inputs — authentication happens in front of
//! this layer and no identity is ever special-cased here.
//!
//! Persistence degradation: when no store is attached, read operations
//! return empty results so the dashboard keeps rendering, while mutations
//! fail with [`ApiError::PersistenceUnavailable`].

use crate::carrier::TrackingProvider;
use crate::db::Database;

pub mod error;
pub mod parcels;
pub mod projects;
pub mod settings;
pub mod weekly_plans;

pub use error::ApiError;

/// The dashboard service: one instance per process, constructed at startup
/// with its dependencies and shared across calls.
pub struct Dashboard {
    db: Option<Database>,
    carrier: Box<dyn TrackingProvider>,
}

impl Dashboard {
    /// Creates the service. `db` is `None` when the backing store could not
    /// be opened; reads then degrade to empty results.
    pub fn new(db: Option<Database>, carrier: Box<dyn TrackingProvider>) -> Self {
        Self { db, carrier }
    }

    /// Store handle for mutations; absent store is a hard failure.
    pub(crate) fn store(&self) -> Result<&Database, ApiError> {
        self.db.as_ref().ok_or(ApiError::PersistenceUnavailable)
    }

    /// Store handle for reads; absent store degrades to `None`.
    pub(crate) fn store_opt(&self) -> Option<&Database> {
        self.db.as_ref()
    }

    pub(crate) fn carrier(&self) -> &dyn TrackingProvider {
        self.carrier.as_ref()
    }
}
