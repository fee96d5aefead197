//! Category service
//!
//! Groups and categories. Categories are never deleted, only hidden, so
//! their history keeps counting toward the budget.

use crate::audit::EntityType;
use crate::error::{PlannerError, PlannerResult};
use crate::models::{Category, CategoryGroup, CategoryId, UserId};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    // === Group Operations ===

    pub fn create_group(&self, owner: UserId, name: &str) -> PlannerResult<CategoryGroup> {
        let name = name.trim();
        if self.storage.groups.get_by_name(owner, name)?.is_some() {
            return Err(PlannerError::Duplicate {
                entity_type: "Category Group",
                identifier: name.to_string(),
            });
        }

        let mut group = CategoryGroup::new(owner, name);
        group.sort_order = self.storage.groups.next_sort_order(owner)?;
        group
            .validate()
            .map_err(|e| PlannerError::Validation(e.to_string()))?;

        self.storage.groups.upsert(group.clone())?;
        self.storage.groups.save()?;
        self.storage.log_create(
            owner,
            EntityType::CategoryGroup,
            group.id.to_string(),
            Some(group.name.clone()),
            &group,
        )?;

        Ok(group)
    }

    /// Find a group by name or id
    pub fn find_group(&self, owner: UserId, identifier: &str) -> PlannerResult<CategoryGroup> {
        if let Some(group) = self.storage.groups.get_by_name(owner, identifier)? {
            return Ok(group);
        }
        self.storage
            .groups
            .find(owner, |g| g.id.matches(identifier))?
            .ok_or_else(|| PlannerError::group_not_found(identifier))
    }

    /// Every group with its categories, both in display order
    pub fn list_groups_with_categories(
        &self,
        owner: UserId,
    ) -> PlannerResult<Vec<(CategoryGroup, Vec<Category>)>> {
        self.storage
            .groups
            .list(owner)?
            .into_iter()
            .map(|group| {
                let categories = self.storage.categories.in_group(owner, group.id)?;
                Ok((group, categories))
            })
            .collect()
    }

    // === Category Operations ===

    pub fn create_category(&self, owner: UserId, name: &str, group: &str) -> PlannerResult<Category> {
        let group = self.find_group(owner, group)?;
        let name = name.trim();
        if self.storage.categories.get_by_name(owner, name)?.is_some() {
            return Err(PlannerError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }

        let mut category = Category::new(owner, name, group.id);
        category.sort_order = self.storage.categories.next_sort_order(owner, group.id)?;
        category
            .validate()
            .map_err(|e| PlannerError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;
        self.storage.log_create(
            owner,
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;

        Ok(category)
    }

    pub fn get_category(&self, owner: UserId, id: CategoryId) -> PlannerResult<Category> {
        self.storage
            .categories
            .get(owner, id)?
            .ok_or_else(|| PlannerError::category_not_found(id.to_string()))
    }

    /// Find a category by name or id
    pub fn find_category(&self, owner: UserId, identifier: &str) -> PlannerResult<Category> {
        if let Some(category) = self.storage.categories.get_by_name(owner, identifier)? {
            return Ok(category);
        }
        self.storage
            .categories
            .find(owner, |c| c.id.matches(identifier))?
            .ok_or_else(|| PlannerError::category_not_found(identifier))
    }

    pub fn list_categories(&self, owner: UserId) -> PlannerResult<Vec<Category>> {
        self.storage.categories.list(owner)
    }

    pub fn set_hidden(&self, owner: UserId, id: CategoryId, hidden: bool) -> PlannerResult<Category> {
        let mut category = self.get_category(owner, id)?;
        if category.hidden == hidden {
            return Ok(category);
        }
        let before = category.clone();
        category.set_hidden(hidden);

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;
        self.storage.log_update(
            owner,
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &before,
            &category,
            None,
        )?;

        Ok(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PlannerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_groups_and_categories_in_order() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);
        let owner = UserId::new();

        service.create_group(owner, "Bills").unwrap();
        service.create_group(owner, "Fun").unwrap();
        service.create_category(owner, "Rent", "Bills").unwrap();
        service.create_category(owner, "Electric", "bills").unwrap();
        service.create_category(owner, "Games", "Fun").unwrap();

        let listing = service.list_groups_with_categories(owner).unwrap();
        let shape: Vec<(String, Vec<String>)> = listing
            .into_iter()
            .map(|(g, cs)| (g.name, cs.into_iter().map(|c| c.name).collect()))
            .collect();
        assert_eq!(
            shape,
            vec![
                ("Bills".to_string(), vec!["Rent".to_string(), "Electric".to_string()]),
                ("Fun".to_string(), vec!["Games".to_string()]),
            ]
        );
    }

    #[test]
    fn test_category_requires_owned_group() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);
        let alice = UserId::new();
        let bob = UserId::new();

        service.create_group(alice, "Bills").unwrap();
        let err = service.create_category(bob, "Rent", "Bills").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_hide_and_find() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);
        let owner = UserId::new();

        service.create_group(owner, "Needs").unwrap();
        let groceries = service.create_category(owner, "Groceries", "Needs").unwrap();

        let hidden = service.set_hidden(owner, groceries.id, true).unwrap();
        assert!(hidden.hidden);
        assert_eq!(
            service.find_category(owner, &groceries.id.short()).unwrap().id,
            groceries.id
        );
        assert!(service.find_category(owner, "Nope").unwrap_err().is_not_found());
    }
}
