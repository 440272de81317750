//! Parcel operations, including the tracking-refresh pipeline.

use log::warn;

use crate::carrier::{self, TrackingEvent};
use crate::db::parcel_repo::{self, NewParcel, ParcelPatch, ParcelRow, TrackingUpdate};
use crate::db::settings_repo;

use super::error::{ApiError, Result};
use super::Dashboard;

impl Dashboard {
    /// Lists the owner's parcels, newest first.
    pub fn list_parcels(&self, owner_id: i64) -> Result<Vec<ParcelRow>> {
        match self.store_opt() {
            Some(db) => Ok(parcel_repo::list_by_owner(db, owner_id)?),
            None => Ok(Vec::new()),
        }
    }

    /// Returns one parcel, or `None` if it does not exist for this owner.
    pub fn get_parcel(&self, id: i64, owner_id: i64) -> Result<Option<ParcelRow>> {
        match self.store_opt() {
            Some(db) => Ok(parcel_repo::find_by_id(db, id, owner_id)?),
            None => Ok(None),
        }
    }

    /// Creates a parcel with only the core fields; derived tracking fields
    /// stay null until the first refresh. Returns the new id.
    pub fn create_parcel(&self, owner_id: i64, parcel: &NewParcel) -> Result<i64> {
        Ok(parcel_repo::insert(self.store()?, owner_id, parcel)?)
    }

    /// Partially updates the user-editable parcel fields.
    pub fn update_parcel(&self, id: i64, owner_id: i64, patch: &ParcelPatch) -> Result<()> {
        Ok(parcel_repo::update(self.store()?, id, owner_id, patch)?)
    }

    /// Deletes a parcel.
    pub fn delete_parcel(&self, id: i64, owner_id: i64) -> Result<()> {
        Ok(parcel_repo::delete(self.store()?, id, owner_id)?)
    }

    /// Refreshes a parcel's tracking snapshot from the carrier.
    ///
    /// Loads the parcel (no network call if it is missing), fetches the
    /// event list with the owner's override token when one is set, and
    /// persists the resolved latest status in a single update. An empty
    /// event list persists nothing and is still a success. The full raw
    /// event sequence is returned either way, for the detail view.
    pub async fn refresh_status(&self, id: i64, owner_id: i64) -> Result<Vec<TrackingEvent>> {
        let db = self.store()?;

        let parcel = parcel_repo::find_by_id(db, id, owner_id)?
            .ok_or(ApiError::ParcelNotFound { id })?;

        let token = self.override_token(owner_id);
        let events = self
            .carrier()
            .track(&parcel.tracking_number, token.as_deref())
            .await?;

        let delivered = carrier::is_delivered(&events);
        if let Some(latest) = carrier::latest(&events) {
            parcel_repo::apply_tracking(
                db,
                id,
                owner_id,
                &TrackingUpdate {
                    current_status: latest.status.clone(),
                    current_status_description: latest.status_description.clone(),
                    current_location: latest.location.clone(),
                    last_updated: latest.status_date.clone(),
                    delivery_status: latest.delivery_status.clone(),
                    is_delivered: delivered,
                },
            )?;
        }

        Ok(events)
    }

    /// Fetches the raw event history for a tracking number without touching
    /// any stored parcel.
    pub async fn tracking_history(
        &self,
        owner_id: i64,
        tracking_number: &str,
    ) -> Result<Vec<TrackingEvent>> {
        let token = self.override_token(owner_id);
        Ok(self.carrier().track(tracking_number, token.as_deref()).await?)
    }

    /// Best-effort lookup of the owner's override token. Missing settings,
    /// an empty token, or an unreachable store all mean "no override".
    pub(crate) fn override_token(&self, owner_id: i64) -> Option<String> {
        let db = self.store_opt()?;
        match settings_repo::get(db, owner_id) {
            Ok(settings) => settings
                .and_then(|s| s.carrier_api_token)
                .filter(|t| !t.is_empty()),
            Err(e) => {
                warn!("Failed to load settings for owner {}: {}", owner_id, e);
                None
            }
        }
    }
}
