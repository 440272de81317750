//! Parcel repository — owner-scoped CRUD for the `parcels` table.
//!
//! Derived tracking columns (`current_status`, `current_location`, ...) are
//! written only through [`apply_tracking`]; everything else goes through
//! [`insert`] and [`update`].

use rusqlite::{params, Row};
use serde::Serialize;

use super::{now_rfc3339, Database, DatabaseError};

/// A parcel row. Timestamps and dates are RFC 3339 strings; `last_updated`
/// carries the carrier's own `status_date` formatting verbatim.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParcelRow {
    pub id: i64,
    pub owner_id: i64,
    pub tracking_number: String,
    pub destination: Option<String>,
    pub recipient_name: Option<String>,
    pub date_sent: Option<String>,
    pub note: Option<String>,
    pub current_status: Option<String>,
    pub current_status_description: Option<String>,
    pub current_location: Option<String>,
    pub last_updated: Option<String>,
    pub delivery_status: Option<String>,
    pub is_delivered: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl ParcelRow {
    fn from_row(row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get("id")?,
            owner_id: row.get("owner_id")?,
            tracking_number: row.get("tracking_number")?,
            destination: row.get("destination")?,
            recipient_name: row.get("recipient_name")?,
            date_sent: row.get("date_sent")?,
            note: row.get("note")?,
            current_status: row.get("current_status")?,
            current_status_description: row.get("current_status_description")?,
            current_location: row.get("current_location")?,
            last_updated: row.get("last_updated")?,
            delivery_status: row.get("delivery_status")?,
            is_delivered: row.get("is_delivered")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

/// Fields supplied when creating a parcel. Derived columns start out null.
#[derive(Debug, Default, Clone)]
pub struct NewParcel {
    pub tracking_number: String,
    pub destination: Option<String>,
    pub recipient_name: Option<String>,
    pub date_sent: Option<String>,
    pub note: Option<String>,
}

/// Partial update of the user-editable parcel fields. `None` leaves the
/// column untouched.
#[derive(Debug, Default, Clone)]
pub struct ParcelPatch {
    pub tracking_number: Option<String>,
    pub destination: Option<String>,
    pub recipient_name: Option<String>,
    pub date_sent: Option<String>,
    pub note: Option<String>,
}

/// The derived columns written by one tracking refresh. Applied as a single
/// UPDATE so a refresh is all-or-nothing.
#[derive(Debug, Clone)]
pub struct TrackingUpdate {
    pub current_status: String,
    pub current_status_description: String,
    pub current_location: String,
    pub last_updated: String,
    pub delivery_status: Option<String>,
    pub is_delivered: bool,
}

/// Inserts a new parcel for the given owner and returns its id.
pub fn insert(db: &Database, owner_id: i64, parcel: &NewParcel) -> Result<i64, DatabaseError> {
    db.with_conn(|conn| {
        let now = now_rfc3339();
        conn.execute(
            "INSERT INTO parcels (owner_id, tracking_number, destination, recipient_name,
             date_sent, note, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
            params![
                owner_id,
                parcel.tracking_number,
                parcel.destination,
                parcel.recipient_name,
                parcel.date_sent,
                parcel.note,
                now,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    })
}

/// Finds a parcel by id, scoped to the owner.
pub fn find_by_id(db: &Database, id: i64, owner_id: i64) -> Result<Option<ParcelRow>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare("SELECT * FROM parcels WHERE id = ?1 AND owner_id = ?2")?;
        let mut rows = stmt.query_map(params![id, owner_id], ParcelRow::from_row)?;
        match rows.next() {
            Some(Ok(row)) => Ok(Some(row)),
            Some(Err(e)) => Err(DatabaseError::Sqlite(e)),
            None => Ok(None),
        }
    })
}

/// Lists all parcels belonging to the owner, newest first.
pub fn list_by_owner(db: &Database, owner_id: i64) -> Result<Vec<ParcelRow>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare("SELECT * FROM parcels WHERE owner_id = ?1 ORDER BY created_at DESC, id DESC")?;
        let rows: Vec<ParcelRow> = stmt
            .query_map(params![owner_id], ParcelRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    })
}

/// Applies a partial update to the user-editable fields. A non-matching
/// (id, owner) pair affects zero rows and is not an error.
pub fn update(
    db: &Database,
    id: i64,
    owner_id: i64,
    patch: &ParcelPatch,
) -> Result<(), DatabaseError> {
    db.with_conn(|conn| {
        let mut assignments = Vec::new();
        let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();
        param_values.push(Box::new(id));
        param_values.push(Box::new(owner_id));

        if let Some(ref tracking_number) = patch.tracking_number {
            assignments.push(format!("tracking_number = ?{}", param_values.len() + 1));
            param_values.push(Box::new(tracking_number.clone()));
        }
        if let Some(ref destination) = patch.destination {
            assignments.push(format!("destination = ?{}", param_values.len() + 1));
            param_values.push(Box::new(destination.clone()));
        }
        if let Some(ref recipient_name) = patch.recipient_name {
            assignments.push(format!("recipient_name = ?{}", param_values.len() + 1));
            param_values.push(Box::new(recipient_name.clone()));
        }
        if let Some(ref date_sent) = patch.date_sent {
            assignments.push(format!("date_sent = ?{}", param_values.len() + 1));
            param_values.push(Box::new(date_sent.clone()));
        }
        if let Some(ref note) = patch.note {
            assignments.push(format!("note = ?{}", param_values.len() + 1));
            param_values.push(Box::new(note.clone()));
        }

        if assignments.is_empty() {
            return Ok(());
        }

        assignments.push(format!("updated_at = ?{}", param_values.len() + 1));
        param_values.push(Box::new(now_rfc3339()));

        let sql = format!(
            "UPDATE parcels SET {} WHERE id = ?1 AND owner_id = ?2",
            assignments.join(", ")
        );
        let params_ref: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();
        conn.execute(&sql, params_ref.as_slice())?;
        Ok(())
    })
}

/// Writes the derived tracking columns in one UPDATE. A non-matching
/// (id, owner) pair affects zero rows and is not an error.
pub fn apply_tracking(
    db: &Database,
    id: i64,
    owner_id: i64,
    update: &TrackingUpdate,
) -> Result<(), DatabaseError> {
    db.with_conn(|conn| {
        conn.execute(
            "UPDATE parcels SET current_status = ?3, current_status_description = ?4,
             current_location = ?5, last_updated = ?6, delivery_status = ?7,
             is_delivered = ?8, updated_at = ?9
             WHERE id = ?1 AND owner_id = ?2",
            params![
                id,
                owner_id,
                update.current_status,
                update.current_status_description,
                update.current_location,
                update.last_updated,
                update.delivery_status,
                update.is_delivered,
                now_rfc3339(),
            ],
        )?;
        Ok(())
    })
}

/// Deletes a parcel, scoped to the owner.
pub fn delete(db: &Database, id: i64, owner_id: i64) -> Result<(), DatabaseError> {
    db.with_conn(|conn| {
        conn.execute(
            "DELETE FROM parcels WHERE id = ?1 AND owner_id = ?2",
            params![id, owner_id],
        )?;
        Ok(())
    })
}
