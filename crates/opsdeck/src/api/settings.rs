//! Settings operations.

use serde::Serialize;

use crate::db::settings_repo::{self, SettingsPatch, SettingsRow};

use super::error::Result;
use super::Dashboard;

/// Probe tracking number used by the connection test. Any well-formed
/// barcode works; the call only has to get past authentication.
const TEST_TRACKING_NUMBER: &str = "EE001040482TH";

/// Outcome of a carrier connection test. A failed probe is reported here
/// rather than raised, so the settings page can render it inline.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionTestResult {
    pub success: bool,
    pub carrier_api: bool,
    pub message: String,
}

impl Dashboard {
    /// Returns the owner's settings row, if any. A missing row means
    /// "all defaults".
    pub fn get_settings(&self, owner_id: i64) -> Result<Option<SettingsRow>> {
        match self.store_opt() {
            Some(db) => Ok(settings_repo::get(db, owner_id)?),
            None => Ok(None),
        }
    }

    /// Creates or updates the owner's settings row.
    pub fn update_settings(&self, owner_id: i64, patch: &SettingsPatch) -> Result<()> {
        Ok(settings_repo::upsert(self.store()?, owner_id, patch)?)
    }

    /// Probes the carrier API with the owner's effective credentials.
    pub async fn test_connection(&self, owner_id: i64) -> ConnectionTestResult {
        let token = self.override_token(owner_id);

        match self
            .carrier()
            .track(TEST_TRACKING_NUMBER, token.as_deref())
            .await
        {
            Ok(_) => ConnectionTestResult {
                success: true,
                carrier_api: true,
                message: "Connection successful".to_string(),
            },
            Err(e) => {
                log::warn!("Carrier connection test failed: {}", e);
                ConnectionTestResult {
                    success: false,
                    carrier_api: false,
                    message: "Carrier API connection failed".to_string(),
                }
            }
        }
    }
}
