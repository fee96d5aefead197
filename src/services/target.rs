//! Target service
//!
//! At most one target per category; setting a target replaces the old one.

use crate::audit::EntityType;
use crate::error::{PlannerError, PlannerResult};
use crate::models::{CategoryId, CategoryTarget, Money, RefillType, TargetType, UserId};
use crate::storage::Storage;

/// Service for category targets
pub struct TargetService<'a> {
    storage: &'a Storage,
}

impl<'a> TargetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create or replace the target of `category`
    pub fn set(
        &self,
        owner: UserId,
        category: CategoryId,
        target_type: TargetType,
        amount: Money,
        refill: RefillType,
        day_of_month: Option<u8>,
    ) -> PlannerResult<CategoryTarget> {
        let category = self
            .storage
            .categories
            .get(owner, category)?
            .ok_or_else(|| PlannerError::category_not_found(category.to_string()))?;

        let existing = self.storage.targets.get(owner, category.id)?;

        let mut target = CategoryTarget::new(owner, category.id, target_type, amount, refill);
        target.day_of_month = day_of_month;
        if let Some(existing) = &existing {
            target.id = existing.id;
            target.created_at = existing.created_at;
        }
        target
            .validate()
            .map_err(|e| PlannerError::Validation(e.to_string()))?;

        self.storage.targets.upsert(target.clone())?;
        self.storage.targets.save()?;

        match existing {
            Some(before) => self.storage.log_update(
                owner,
                EntityType::Target,
                target.id.to_string(),
                Some(category.name.clone()),
                &before,
                &target,
                None,
            )?,
            None => self.storage.log_create(
                owner,
                EntityType::Target,
                target.id.to_string(),
                Some(category.name.clone()),
                &target,
            )?,
        }

        Ok(target)
    }

    pub fn get(&self, owner: UserId, category: CategoryId) -> PlannerResult<Option<CategoryTarget>> {
        if self.storage.categories.get(owner, category)?.is_none() {
            return Err(PlannerError::category_not_found(category.to_string()));
        }
        self.storage.targets.get(owner, category)
    }

    /// Remove the target of `category`; returns whether one existed
    pub fn clear(&self, owner: UserId, category: CategoryId) -> PlannerResult<bool> {
        let Some(target) = self.storage.targets.remove(owner, category)? else {
            return Ok(false);
        };
        self.storage.targets.save()?;
        self.storage.log_delete(
            owner,
            EntityType::Target,
            target.id.to_string(),
            None,
            &target,
        )?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerPaths;
    use crate::models::{Category, CategoryGroupId};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PlannerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_set_replaces_and_keeps_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TargetService::new(&storage);
        let owner = UserId::new();
        let category = Category::new(owner, "Vacation", CategoryGroupId::new());
        storage.categories.upsert(category.clone()).unwrap();

        let first = service
            .set(owner, category.id, TargetType::Monthly, Money::from_cents(5000), RefillType::Refill, None)
            .unwrap();
        let second = service
            .set(owner, category.id, TargetType::Yearly, Money::from_cents(60000), RefillType::SetAside, Some(15))
            .unwrap();

        assert_eq!(first.id, second.id);
        let stored = service.get(owner, category.id).unwrap().unwrap();
        assert_eq!(stored.amount.cents(), 60000);
        assert_eq!(stored.refill, RefillType::SetAside);

        assert!(service.clear(owner, category.id).unwrap());
        assert!(!service.clear(owner, category.id).unwrap());
    }

    #[test]
    fn test_invalid_target_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TargetService::new(&storage);
        let owner = UserId::new();
        let category = Category::new(owner, "Gifts", CategoryGroupId::new());
        storage.categories.upsert(category.clone()).unwrap();

        let err = service
            .set(owner, category.id, TargetType::Monthly, Money::zero(), RefillType::Refill, None)
            .unwrap_err();
        assert!(err.is_validation());

        let err = service
            .set(UserId::new(), category.id, TargetType::Monthly, Money::from_cents(1), RefillType::Refill, None)
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
