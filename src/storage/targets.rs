//! Category target repository (targets.json)
//!
//! Keyed by category, which keeps targets at one per category.

use crate::models::{CategoryId, CategoryTarget, UserId};

use super::table::{Record, Table};

impl Record for CategoryTarget {
    type Key = CategoryId;

    fn key(&self) -> CategoryId {
        self.category_id
    }

    fn owner(&self) -> UserId {
        self.owner
    }
}

pub type TargetRepository = Table<CategoryTarget>;
