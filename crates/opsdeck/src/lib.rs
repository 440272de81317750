pub mod api;
pub mod carrier;
pub mod config;
pub mod db;
pub mod error;

pub use api::{ApiError, Dashboard};
pub use carrier::{is_delivered, latest, CarrierClient, CarrierError, TrackingEvent, TrackingProvider};
pub use config::{load_config, Config};
pub use error::{ConfigError, OpsdeckError, Result};
