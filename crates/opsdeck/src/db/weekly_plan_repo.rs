//! Weekly plan repository — owner-scoped CRUD for the `weekly_plans` table.

use rusqlite::{params, Row};
use serde::Serialize;

use super::{now_rfc3339, Database, DatabaseError};

/// A weekly plan entry. `week_start_date` identifies the week; entries for
/// one week share the same value.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPlanRow {
    pub id: i64,
    pub owner_id: i64,
    pub week_start_date: String,
    pub title: String,
    pub description: Option<String>,
    pub day_of_week: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub is_completed: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl WeeklyPlanRow {
    fn from_row(row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get("id")?,
            owner_id: row.get("owner_id")?,
            week_start_date: row.get("week_start_date")?,
            title: row.get("title")?,
            description: row.get("description")?,
            day_of_week: row.get("day_of_week")?,
            start_time: row.get("start_time")?,
            end_time: row.get("end_time")?,
            is_completed: row.get("is_completed")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

/// Fields supplied when creating a weekly plan entry.
#[derive(Debug, Default, Clone)]
pub struct NewWeeklyPlan {
    pub week_start_date: String,
    pub title: String,
    pub description: Option<String>,
    pub day_of_week: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// Partial update of weekly plan fields. `None` leaves the column untouched.
#[derive(Debug, Default, Clone)]
pub struct WeeklyPlanPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub day_of_week: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub is_completed: Option<bool>,
}

/// Inserts a new weekly plan entry for the given owner and returns its id.
pub fn insert(db: &Database, owner_id: i64, plan: &NewWeeklyPlan) -> Result<i64, DatabaseError> {
    db.with_conn(|conn| {
        let now = now_rfc3339();
        conn.execute(
            "INSERT INTO weekly_plans (owner_id, week_start_date, title, description,
             day_of_week, start_time, end_time, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
            params![
                owner_id,
                plan.week_start_date,
                plan.title,
                plan.description,
                plan.day_of_week,
                plan.start_time,
                plan.end_time,
                now,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    })
}

/// Lists all weekly plan entries belonging to the owner, newest first.
pub fn list_by_owner(db: &Database, owner_id: i64) -> Result<Vec<WeeklyPlanRow>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT * FROM weekly_plans WHERE owner_id = ?1 ORDER BY created_at DESC, id DESC",
        )?;
        let rows: Vec<WeeklyPlanRow> = stmt
            .query_map(params![owner_id], WeeklyPlanRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    })
}

/// Lists the owner's entries for one week, identified by its start date.
pub fn list_by_week(
    db: &Database,
    owner_id: i64,
    week_start_date: &str,
) -> Result<Vec<WeeklyPlanRow>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT * FROM weekly_plans WHERE owner_id = ?1 AND week_start_date = ?2
             ORDER BY created_at DESC, id DESC",
        )?;
        let rows: Vec<WeeklyPlanRow> = stmt
            .query_map(params![owner_id, week_start_date], WeeklyPlanRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    })
}

/// Finds a weekly plan entry by id, scoped to the owner.
pub fn find_by_id(
    db: &Database,
    id: i64,
    owner_id: i64,
) -> Result<Option<WeeklyPlanRow>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt =
            conn.prepare("SELECT * FROM weekly_plans WHERE id = ?1 AND owner_id = ?2")?;
        let mut rows = stmt.query_map(params![id, owner_id], WeeklyPlanRow::from_row)?;
        match rows.next() {
            Some(Ok(row)) => Ok(Some(row)),
            Some(Err(e)) => Err(DatabaseError::Sqlite(e)),
            None => Ok(None),
        }
    })
}

/// Applies a partial update. A non-matching (id, owner) pair affects zero
/// rows and is not an error.
pub fn update(
    db: &Database,
    id: i64,
    owner_id: i64,
    patch: &WeeklyPlanPatch,
) -> Result<(), DatabaseError> {
    db.with_conn(|conn| {
        let mut assignments = Vec::new();
        let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();
        param_values.push(Box::new(id));
        param_values.push(Box::new(owner_id));

        if let Some(ref title) = patch.title {
            assignments.push(format!("title = ?{}", param_values.len() + 1));
            param_values.push(Box::new(title.clone()));
        }
        if let Some(ref description) = patch.description {
            assignments.push(format!("description = ?{}", param_values.len() + 1));
            param_values.push(Box::new(description.clone()));
        }
        if let Some(ref day_of_week) = patch.day_of_week {
            assignments.push(format!("day_of_week = ?{}", param_values.len() + 1));
            param_values.push(Box::new(day_of_week.clone()));
        }
        if let Some(ref start_time) = patch.start_time {
            assignments.push(format!("start_time = ?{}", param_values.len() + 1));
            param_values.push(Box::new(start_time.clone()));
        }
        if let Some(ref end_time) = patch.end_time {
            assignments.push(format!("end_time = ?{}", param_values.len() + 1));
            param_values.push(Box::new(end_time.clone()));
        }
        if let Some(is_completed) = patch.is_completed {
            assignments.push(format!("is_completed = ?{}", param_values.len() + 1));
            param_values.push(Box::new(is_completed));
        }

        if assignments.is_empty() {
            return Ok(());
        }

        assignments.push(format!("updated_at = ?{}", param_values.len() + 1));
        param_values.push(Box::new(now_rfc3339()));

        let sql = format!(
            "UPDATE weekly_plans SET {} WHERE id = ?1 AND owner_id = ?2",
            assignments.join(", ")
        );
        let params_ref: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();
        conn.execute(&sql, params_ref.as_slice())?;
        Ok(())
    })
}

/// Deletes a weekly plan entry, scoped to the owner.
pub fn delete(db: &Database, id: i64, owner_id: i64) -> Result<(), DatabaseError> {
    db.with_conn(|conn| {
        conn.execute(
            "DELETE FROM weekly_plans WHERE id = ?1 AND owner_id = ?2",
            params![id, owner_id],
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

    fn sample_plan(week: &str, day: &str, title: &str) -> NewWeeklyPlan {
        NewWeeklyPlan {
            week_start_date: week.to_string(),
            title: title.to_string(),
            day_of_week: day.to_string(),
            start_time: Some("09:00".to_string()),
            end_time: Some("10:00".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_insert_and_list() {
        let db = test_db();
        insert(&db, 1, &sample_plan("2026-02-02", "monday", "Standup")).unwrap();
        insert(&db, 1, &sample_plan("2026-02-02", "friday", "Review")).unwrap();

        let rows = list_by_owner(&db, 1).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| !r.is_completed));
    }

    #[test]
    fn test_list_by_week_filters() {
        let db = test_db();
        insert(&db, 1, &sample_plan("2026-02-02", "monday", "This week")).unwrap();
        insert(&db, 1, &sample_plan("2026-02-09", "monday", "Next week")).unwrap();
        insert(&db, 2, &sample_plan("2026-02-02", "monday", "Someone else")).unwrap();

        let rows = list_by_week(&db, 1, "2026-02-02").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "This week");
    }

    #[test]
    fn test_invalid_day_rejected() {
        let db = test_db();
        let result = insert(&db, 1, &sample_plan("2026-02-02", "someday", "Nope"));
        assert!(result.is_err());
    }

    #[test]
    fn test_mark_completed() {
        let db = test_db();
        let id = insert(&db, 1, &sample_plan("2026-02-02", "tuesday", "Gym")).unwrap();

        update(
            &db,
            id,
            1,
            &WeeklyPlanPatch {
                is_completed: Some(true),
                ..Default::default()
            },
        )
        .unwrap();

        let row = find_by_id(&db, id, 1).unwrap().unwrap();
        assert!(row.is_completed);
    }

    #[test]
    fn test_update_wrong_owner_is_silent_noop() {
        let db = test_db();
        let id = insert(&db, 1, &sample_plan("2026-02-02", "tuesday", "Gym")).unwrap();

        update(
            &db,
            id,
            2,
            &WeeklyPlanPatch {
                title: Some("Hijacked".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        let row = find_by_id(&db, id, 1).unwrap().unwrap();
        assert_eq!(row.title, "Gym");
    }

    #[test]
    fn test_delete_scoped_to_owner() {
        let db = test_db();
        let id = insert(&db, 1, &sample_plan("2026-02-02", "sunday", "Rest")).unwrap();

        delete(&db, id, 2).unwrap();
        assert!(find_by_id(&db, id, 1).unwrap().is_some());

        delete(&db, id, 1).unwrap();
        assert!(find_by_id(&db, id, 1).unwrap().is_none());
    }
}
