//! Settings repository — one optional row per owner.
//!
//! A missing row is a normal state and means "use defaults" (in particular,
//! the built-in carrier API token).

use rusqlite::{params, Row};
use serde::Serialize;

use super::{now_rfc3339, Database, DatabaseError};

/// Per-owner settings row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsRow {
    pub id: i64,
    pub owner_id: i64,
    /// Overrides the default carrier API token when set.
    pub carrier_api_token: Option<String>,
    pub notifications_enabled: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl SettingsRow {
    fn from_row(row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get("id")?,
            owner_id: row.get("owner_id")?,
            carrier_api_token: row.get("carrier_api_token")?,
            notifications_enabled: row.get("notifications_enabled")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

/// Partial settings update. `None` leaves the field untouched; on first
/// write the remaining fields take their defaults.
#[derive(Debug, Default, Clone)]
pub struct SettingsPatch {
    pub carrier_api_token: Option<String>,
    pub notifications_enabled: Option<bool>,
}

/// Returns the owner's settings row, if one exists.
pub fn get(db: &Database, owner_id: i64) -> Result<Option<SettingsRow>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare("SELECT * FROM settings WHERE owner_id = ?1")?;
        let mut rows = stmt.query_map(params![owner_id], SettingsRow::from_row)?;
        match rows.next() {
            Some(Ok(row)) => Ok(Some(row)),
            Some(Err(e)) => Err(DatabaseError::Sqlite(e)),
            None => Ok(None),
        }
    })
}

/// Creates or updates the owner's settings row with the patched fields.
pub fn upsert(db: &Database, owner_id: i64, patch: &SettingsPatch) -> Result<(), DatabaseError> {
    db.with_conn(|conn| {
        let now = now_rfc3339();
        conn.execute(
            "INSERT INTO settings (owner_id, carrier_api_token, notifications_enabled,
             created_at, updated_at)
             VALUES (?1, ?2, COALESCE(?3, 1), ?4, ?4)
             ON CONFLICT(owner_id) DO UPDATE SET
               carrier_api_token = COALESCE(?2, carrier_api_token),
               notifications_enabled = COALESCE(?3, notifications_enabled),
               updated_at = ?4",
            params![
                owner_id,
                patch.carrier_api_token,
                patch.notifications_enabled,
                now,
            ],
        )?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> Database {
        Database::open_in_memory().expect("Failed to create test database")
    }

    #[test]
    fn test_missing_row_is_none() {
        let db = test_db();
        assert!(get(&db, 1).unwrap().is_none());
    }

    #[test]
    fn test_upsert_creates_row_with_defaults() {
        let db = test_db();
        upsert(
            &db,
            1,
            &SettingsPatch {
                carrier_api_token: Some("Token abc".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        let row = get(&db, 1).unwrap().unwrap();
        assert_eq!(row.carrier_api_token.as_deref(), Some("Token abc"));
        assert!(row.notifications_enabled);
    }

    #[test]
    fn test_upsert_updates_existing_row() {
        let db = test_db();
        upsert(
            &db,
            1,
            &SettingsPatch {
                carrier_api_token: Some("Token abc".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        upsert(
            &db,
            1,
            &SettingsPatch {
                notifications_enabled: Some(false),
                ..Default::default()
            },
        )
        .unwrap();

        let row = get(&db, 1).unwrap().unwrap();
        // The token survives an unrelated update.
        assert_eq!(row.carrier_api_token.as_deref(), Some("Token abc"));
        assert!(!row.notifications_enabled);
    }

    #[test]
    fn test_settings_are_per_owner() {
        let db = test_db();
        upsert(
            &db,
            1,
            &SettingsPatch {
                carrier_api_token: Some("Token one".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        assert!(get(&db, 2).unwrap().is_none());
        upsert(
            &db,
            2,
            &SettingsPatch {
                carrier_api_token: Some("Token two".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(
            get(&db, 1).unwrap().unwrap().carrier_api_token.as_deref(),
            Some("Token one")
        );
        assert_eq!(
            get(&db, 2).unwrap().unwrap().carrier_api_token.as_deref(),
            Some("Token two")
        );
    }
}
