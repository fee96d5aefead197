//! First-run setup
//!
//! Seeds a starter set of category groups and categories for a user who has
//! none yet.

use crate::error::PlannerError;
use crate::models::{Category, CategoryGroup, UserId};

use super::Storage;

const DEFAULT_GROUPS: &[(&str, &[&str])] = &[
    (
        "Bills",
        &["Rent/Mortgage", "Electric", "Water", "Internet", "Phone", "Insurance"],
    ),
    ("Needs", &["Groceries", "Transportation", "Medical", "Household"]),
    ("Wants", &["Dining Out", "Entertainment", "Shopping", "Subscriptions"]),
    ("Savings", &["Emergency Fund", "Vacation", "Large Purchases"]),
];

/// Create the default groups and categories for `owner`
///
/// Does nothing and returns `false` if the user already has any group.
pub fn seed_default_categories(storage: &Storage, owner: UserId) -> Result<bool, PlannerError> {
    if storage.groups.count(owner)? > 0 {
        return Ok(false);
    }

    for (group_order, (group_name, categories)) in DEFAULT_GROUPS.iter().enumerate() {
        let mut group = CategoryGroup::new(owner, *group_name);
        group.sort_order = group_order as i32;
        let group_id = group.id;
        storage.groups.upsert(group)?;

        for (order, name) in categories.iter().enumerate() {
            let mut category = Category::new(owner, *name, group_id);
            category.sort_order = order as i32;
            storage.categories.upsert(category)?;
        }
    }

    storage.groups.save()?;
    storage.categories.save()?;

    tracing::info!(owner = %owner, groups = DEFAULT_GROUPS.len(), "seeded default categories");
    Ok(true)
}
