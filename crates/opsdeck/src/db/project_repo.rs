//! Project repository — owner-scoped CRUD for the `projects` table.
//!
//! `status` and `priority` are stored as strings and constrained by CHECK
//! clauses in the schema (`planning`/`in_progress`/`completed`/`on_hold`
//! and `low`/`medium`/`high`).

use rusqlite::{params, Row};
use serde::Serialize;

use super::{now_rfc3339, Database, DatabaseError};

/// A project row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRow {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub due_date: Option<String>,
    pub completed_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl ProjectRow {
    fn from_row(row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get("id")?,
            owner_id: row.get("owner_id")?,
            title: row.get("title")?,
            description: row.get("description")?,
            status: row.get("status")?,
            priority: row.get("priority")?,
            due_date: row.get("due_date")?,
            completed_at: row.get("completed_at")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

/// Fields supplied when creating a project. Omitted status/priority fall
/// back to the schema defaults.
#[derive(Debug, Default, Clone)]
pub struct NewProject {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
}

/// Partial update of project fields. `None` leaves the column untouched.
#[derive(Debug, Default, Clone)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
    pub completed_at: Option<String>,
}

/// Inserts a new project for the given owner and returns its id.
pub fn insert(db: &Database, owner_id: i64, project: &NewProject) -> Result<i64, DatabaseError> {
    db.with_conn(|conn| {
        let now = now_rfc3339();
        conn.execute(
            "INSERT INTO projects (owner_id, title, description, status, priority, due_date,
             created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
            params![
                owner_id,
                project.title,
                project.description,
                project.status.as_deref().unwrap_or("planning"),
                project.priority.as_deref().unwrap_or("medium"),
                project.due_date,
                now,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    })
}

/// Finds a project by id, scoped to the owner.
pub fn find_by_id(
    db: &Database,
    id: i64,
    owner_id: i64,
) -> Result<Option<ProjectRow>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare("SELECT * FROM projects WHERE id = ?1 AND owner_id = ?2")?;
        let mut rows = stmt.query_map(params![id, owner_id], ProjectRow::from_row)?;
        match rows.next() {
            Some(Ok(row)) => Ok(Some(row)),
            Some(Err(e)) => Err(DatabaseError::Sqlite(e)),
            None => Ok(None),
        }
    })
}

/// Lists all projects belonging to the owner, newest first.
pub fn list_by_owner(db: &Database, owner_id: i64) -> Result<Vec<ProjectRow>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare("SELECT * FROM projects WHERE owner_id = ?1 ORDER BY created_at DESC, id DESC")?;
        let rows: Vec<ProjectRow> = stmt
            .query_map(params![owner_id], ProjectRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    })
}

/// Applies a partial update. A non-matching (id, owner) pair affects zero
/// rows and is not an error.
pub fn update(
    db: &Database,
    id: i64,
    owner_id: i64,
    patch: &ProjectPatch,
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
        if let Some(ref status) = patch.status {
            assignments.push(format!("status = ?{}", param_values.len() + 1));
            param_values.push(Box::new(status.clone()));
        }
        if let Some(ref priority) = patch.priority {
            assignments.push(format!("priority = ?{}", param_values.len() + 1));
            param_values.push(Box::new(priority.clone()));
        }
        if let Some(ref due_date) = patch.due_date {
            assignments.push(format!("due_date = ?{}", param_values.len() + 1));
            param_values.push(Box::new(due_date.clone()));
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
            "UPDATE projects SET {} WHERE id = ?1 AND owner_id = ?2",
            assignments.join(", ")
        );
        let params_ref: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();
        conn.execute(&sql, params_ref.as_slice())?;
        Ok(())
    })
}

/// Deletes a project, scoped to the owner. Tasks cascade via the schema.
pub fn delete(db: &Database, id: i64, owner_id: i64) -> Result<(), DatabaseError> {
    db.with_conn(|conn| {
        conn.execute(
            "DELETE FROM projects WHERE id = ?1 AND owner_id = ?2",
            params![id, owner_id],
        )?;
        Ok(())
    })
}
