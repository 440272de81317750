//! Project and project-task operations.

use crate::db::project_repo::{self, NewProject, ProjectPatch, ProjectRow};
use crate::db::project_task_repo::{self, ProjectTaskPatch, ProjectTaskRow};

use super::error::Result;
use super::Dashboard;

impl Dashboard {
    /// Lists the owner's projects, newest first.
    pub fn list_projects(&self, owner_id: i64) -> Result<Vec<ProjectRow>> {
        match self.store_opt() {
            Some(db) => Ok(project_repo::list_by_owner(db, owner_id)?),
            None => Ok(Vec::new()),
        }
    }

    /// Returns one project, or `None` if it does not exist for this owner.
    pub fn get_project(&self, id: i64, owner_id: i64) -> Result<Option<ProjectRow>> {
        match self.store_opt() {
            Some(db) => Ok(project_repo::find_by_id(db, id, owner_id)?),
            None => Ok(None),
        }
    }

    /// Creates a project and returns its id.
    pub fn create_project(&self, owner_id: i64, project: &NewProject) -> Result<i64> {
        Ok(project_repo::insert(self.store()?, owner_id, project)?)
    }

    /// Partially updates a project.
    pub fn update_project(&self, id: i64, owner_id: i64, patch: &ProjectPatch) -> Result<()> {
        Ok(project_repo::update(self.store()?, id, owner_id, patch)?)
    }

    /// Deletes a project; its tasks cascade.
    pub fn delete_project(&self, id: i64, owner_id: i64) -> Result<()> {
        Ok(project_repo::delete(self.store()?, id, owner_id)?)
    }

    /// Lists the tasks under a project, newest first.
    pub fn list_project_tasks(&self, project_id: i64) -> Result<Vec<ProjectTaskRow>> {
        match self.store_opt() {
            Some(db) => Ok(project_task_repo::list_by_project(db, project_id)?),
            None => Ok(Vec::new()),
        }
    }

    /// Creates a task under a project and returns its id.
    pub fn create_project_task(
        &self,
        project_id: i64,
        title: &str,
        description: Option<&str>,
    ) -> Result<i64> {
        Ok(project_task_repo::insert(
            self.store()?,
            project_id,
            title,
            description,
        )?)
    }

    /// Partially updates a task.
    pub fn update_project_task(&self, id: i64, patch: &ProjectTaskPatch) -> Result<()> {
        Ok(project_task_repo::update(self.store()?, id, patch)?)
    }

    /// Deletes a task.
    pub fn delete_project_task(&self, id: i64) -> Result<()> {
        Ok(project_task_repo::delete(self.store()?, id)?)
    }
}
