//! Monthly assignment repository (assignments.json)
//!
//! Keyed by `(category, month)`: writing the same key replaces the row.

use crate::error::PlannerError;
use crate::models::{CategoryId, MonthKey, MonthlyAssignment, UserId};

use super::table::{Record, Table};

impl Record for MonthlyAssignment {
    type Key = (CategoryId, MonthKey);

    fn key(&self) -> (CategoryId, MonthKey) {
        (self.category_id, self.month)
    }

    fn owner(&self) -> UserId {
        self.owner
    }
}

pub type AssignmentRepository = Table<MonthlyAssignment>;

impl Table<MonthlyAssignment> {
    /// Every assignment of `owner` for months up to and including `month`
    pub fn through(&self, owner: UserId, month: MonthKey) -> Result<Vec<MonthlyAssignment>, PlannerError> {
        self.select(owner, |a| a.month <= month)
    }

    /// Assignment history of one category, oldest month first
    pub fn history(&self, owner: UserId, category: CategoryId) -> Result<Vec<MonthlyAssignment>, PlannerError> {
        let mut rows = self.select(owner, |a| a.category_id == category)?;
        rows.sort_by_key(|a| a.month);
        Ok(rows)
    }
}
