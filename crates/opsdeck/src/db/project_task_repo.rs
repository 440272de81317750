//! Project task repository — CRUD for the `project_tasks` table.
//!
//! Tasks are scoped by project, not directly by owner; the service layer
//! resolves the owning project first. Deleting a project cascades here.

use rusqlite::{params, Row};
use serde::Serialize;

use super::{now_rfc3339, Database, DatabaseError};

/// A project task row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTaskRow {
    pub id: i64,
    pub project_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub completed_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl ProjectTaskRow {
    fn from_row(row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get("id")?,
            project_id: row.get("project_id")?,
            title: row.get("title")?,
            description: row.get("description")?,
            is_completed: row.get("is_completed")?,
            completed_at: row.get("completed_at")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

/// Partial update of task fields. `None` leaves the column untouched.
#[derive(Debug, Default, Clone)]
pub struct ProjectTaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_completed: Option<bool>,
    pub completed_at: Option<String>,
}

/// Inserts a new task under the given project and returns its id.
pub fn insert(
    db: &Database,
    project_id: i64,
    title: &str,
    description: Option<&str>,
) -> Result<i64, DatabaseError> {
    db.with_conn(|conn| {
        let now = now_rfc3339();
        conn.execute(
            "INSERT INTO project_tasks (project_id, title, description, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)",
            params![project_id, title, description, now],
        )?;
        Ok(conn.last_insert_rowid())
    })
}

/// Lists all tasks for a project, newest first.
pub fn list_by_project(db: &Database, project_id: i64) -> Result<Vec<ProjectTaskRow>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT * FROM project_tasks WHERE project_id = ?1 ORDER BY created_at DESC, id DESC",
        )?;
        let rows: Vec<ProjectTaskRow> = stmt
            .query_map(params![project_id], ProjectTaskRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    })
}

/// Finds a task by its id.
pub fn find_by_id(db: &Database, id: i64) -> Result<Option<ProjectTaskRow>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare("SELECT * FROM project_tasks WHERE id = ?1")?;
        let mut rows = stmt.query_map(params![id], ProjectTaskRow::from_row)?;
        match rows.next() {
            Some(Ok(row)) => Ok(Some(row)),
            Some(Err(e)) => Err(DatabaseError::Sqlite(e)),
            None => Ok(None),
        }
    })
}

/// Applies a partial update to a task.
pub fn update(db: &Database, id: i64, patch: &ProjectTaskPatch) -> Result<(), DatabaseError> {
    db.with_conn(|conn| {
        let mut assignments = Vec::new();
        let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();
        param_values.push(Box::new(id));

        if let Some(ref title) = patch.title {
            assignments.push(format!("title = ?{}", param_values.len() + 1));
            param_values.push(Box::new(title.clone()));
        }
        if let Some(ref description) = patch.description {
            assignments.push(format!("description = ?{}", param_values.len() + 1));
            param_values.push(Box::new(description.clone()));
        }
        if let Some(is_completed) = patch.is_completed {
            assignments.push(format!("is_completed = ?{}", param_values.len() + 1));
            param_values.push(Box::new(is_completed));
        }
        if let Some(ref completed_at) = patch.completed_at {
            assignments.push(format!("completed_at = ?{}", param_values.len() + 1));
            param_values.push(Box::new(completed_at.clone()));
        }

        if assignments.is_empty() {
            return Ok(());
        }

        assignments.push(format!("updated_at = ?{}", param_values.len() + 1));
        param_values.push(Box::new(now_rfc3339()));

        let sql = format!(
            "UPDATE project_tasks SET {} WHERE id = ?1",
            assignments.join(", ")
        );
        let params_ref: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();
        conn.execute(&sql, params_ref.as_slice())?;
        Ok(())
    })
}

/// Deletes a task.
pub fn delete(db: &Database, id: i64) -> Result<(), DatabaseError> {
    db.with_conn(|conn| {
        conn.execute("DELETE FROM project_tasks WHERE id = ?1", params![id])?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::project_repo::{self, NewProject};

    fn test_db() -> Database {
        Database::open_in_memory().expect("Failed to create test database")
    }

    fn test_project(db: &Database) -> i64 {
        project_repo::insert(
            db,
            1,
            &NewProject {
                title: "Parent".to_string(),
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_insert_and_list() {
        let db = test_db();
        let project_id = test_project(&db);

        insert(&db, project_id, "First task", Some("details")).unwrap();
        insert(&db, project_id, "Second task", None).unwrap();

        let tasks = list_by_project(&db, project_id).unwrap();
        assert_eq!(tasks.len(), 2);
        assert!(tasks.iter().all(|t| !t.is_completed));
    }

    #[test]
    fn test_complete_task() {
        let db = test_db();
        let project_id = test_project(&db);
        let id = insert(&db, project_id, "Finish me", None).unwrap();

        update(
            &db,
            id,
            &ProjectTaskPatch {
                is_completed: Some(true),
                completed_at: Some("2026-02-01T09:00:00Z".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        let task = find_by_id(&db, id).unwrap().unwrap();
        assert!(task.is_completed);
        assert_eq!(task.completed_at.as_deref(), Some("2026-02-01T09:00:00Z"));
    }

    #[test]
    fn test_delete_project_cascades_tasks() {
        let db = test_db();
        let project_id = test_project(&db);
        let task_id = insert(&db, project_id, "Orphan-to-be", None).unwrap();

        project_repo::delete(&db, project_id, 1).unwrap();

        assert!(find_by_id(&db, task_id).unwrap().is_none());
    }

    #[test]
    fn test_delete_task() {
        let db = test_db();
        let project_id = test_project(&db);
        let id = insert(&db, project_id, "Gone soon", None).unwrap();

        delete(&db, id).unwrap();
        assert!(find_by_id(&db, id).unwrap().is_none());
    }
}
