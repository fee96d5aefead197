//! Monthly assignment model
//!
//! How much money the user assigned to a category in a given month. There is
//! at most one row per (category, month); edits replace it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, UserId};
use super::money::Money;
use super::month::MonthKey;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyAssignment {
    pub owner: UserId,
    pub category_id: CategoryId,
    pub month: MonthKey,
    pub assigned: Money,
    pub updated_at: DateTime<Utc>,
}

impl MonthlyAssignment {
    pub fn new(owner: UserId, category_id: CategoryId, month: MonthKey, assigned: Money) -> Self {
        Self {
            owner,
            category_id,
            month,
            assigned,
            updated_at: Utc::now(),
        }
    }

    /// Identity key of the row
    pub fn key(&self) -> (CategoryId, MonthKey) {
        (self.category_id, self.month)
    }

    pub fn set_assigned(&mut self, amount: Money) {
        self.assigned = amount;
        self.updated_at = Utc::now();
    }
}

impl fmt::Display for MonthlyAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} assigned: {}", self.month, self.assigned)
    }
}
