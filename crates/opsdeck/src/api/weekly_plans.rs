//! Weekly plan operations.

use crate::db::weekly_plan_repo::{self, NewWeeklyPlan, WeeklyPlanPatch, WeeklyPlanRow};

use super::error::Result;
use super::Dashboard;

impl Dashboard {
    /// Lists all of the owner's weekly plan entries, newest first.
    pub fn list_weekly_plans(&self, owner_id: i64) -> Result<Vec<WeeklyPlanRow>> {
        match self.store_opt() {
            Some(db) => Ok(weekly_plan_repo::list_by_owner(db, owner_id)?),
            None => Ok(Vec::new()),
        }
    }

    /// Lists the owner's entries for one week.
    pub fn weekly_plans_for_week(
        &self,
        owner_id: i64,
        week_start_date: &str,
    ) -> Result<Vec<WeeklyPlanRow>> {
        match self.store_opt() {
            Some(db) => Ok(weekly_plan_repo::list_by_week(db, owner_id, week_start_date)?),
            None => Ok(Vec::new()),
        }
    }

    /// Creates a weekly plan entry and returns its id.
    pub fn create_weekly_plan(&self, owner_id: i64, plan: &NewWeeklyPlan) -> Result<i64> {
        Ok(weekly_plan_repo::insert(self.store()?, owner_id, plan)?)
    }

    /// Partially updates a weekly plan entry.
    pub fn update_weekly_plan(
        &self,
        id: i64,
        owner_id: i64,
        patch: &WeeklyPlanPatch,
    ) -> Result<()> {
        Ok(weekly_plan_repo::update(self.store()?, id, owner_id, patch)?)
    }

    /// Deletes a weekly plan entry.
    pub fn delete_weekly_plan(&self, id: i64, owner_id: i64) -> Result<()> {
        Ok(weekly_plan_repo::delete(self.store()?, id, owner_id)?)
    }
}
