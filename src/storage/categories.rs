//! Category group and category repositories (groups.json, categories.json)

use crate::error::PlannerError;
use crate::models::{Category, CategoryGroup, CategoryGroupId, CategoryId, UserId};

use super::table::{Record, Table};

impl Record for CategoryGroup {
    type Key = CategoryGroupId;

    fn key(&self) -> CategoryGroupId {
        self.id
    }

    fn owner(&self) -> UserId {
        self.owner
    }
}

impl Record for Category {
    type Key = CategoryId;

    fn key(&self) -> CategoryId {
        self.id
    }

    fn owner(&self) -> UserId {
        self.owner
    }
}

pub type GroupRepository = Table<CategoryGroup>;
pub type CategoryRepository = Table<Category>;

impl Table<CategoryGroup> {
    /// Groups by sort order, then name
    pub fn list(&self, owner: UserId) -> Result<Vec<CategoryGroup>, PlannerError> {
        let mut groups = self.all(owner)?;
        groups.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then_with(|| a.name.cmp(&b.name)));
        Ok(groups)
    }

    pub fn get_by_name(&self, owner: UserId, name: &str) -> Result<Option<CategoryGroup>, PlannerError> {
        let name_lower = name.to_lowercase();
        self.find(owner, |g| g.name.to_lowercase() == name_lower)
    }

    pub fn next_sort_order(&self, owner: UserId) -> Result<i32, PlannerError> {
        Ok(self.all(owner)?.iter().map(|g| g.sort_order + 1).max().unwrap_or(0))
    }
}

impl Table<Category> {
    /// Categories by sort order, then name
    pub fn list(&self, owner: UserId) -> Result<Vec<Category>, PlannerError> {
        let mut categories = self.all(owner)?;
        sort_categories(&mut categories);
        Ok(categories)
    }

    pub fn in_group(&self, owner: UserId, group: CategoryGroupId) -> Result<Vec<Category>, PlannerError> {
        let mut categories = self.select(owner, |c| c.group_id == group)?;
        sort_categories(&mut categories);
        Ok(categories)
    }

    pub fn get_by_name(&self, owner: UserId, name: &str) -> Result<Option<Category>, PlannerError> {
        let name_lower = name.to_lowercase();
        self.find(owner, |c| c.name.to_lowercase() == name_lower)
    }

    pub fn next_sort_order(&self, owner: UserId, group: CategoryGroupId) -> Result<i32, PlannerError> {
        Ok(self
            .in_group(owner, group)?
            .iter()
            .map(|c| c.sort_order + 1)
            .max()
            .unwrap_or(0))
    }
}

fn sort_categories(categories: &mut [Category]) {
    categories.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then_with(|| a.name.cmp(&b.name)));
}
