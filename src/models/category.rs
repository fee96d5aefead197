//! Category and CategoryGroup models
//!
//! Categories are the envelopes money is assigned to. Groups only organize
//! them for display.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryGroupId, CategoryId, UserId};

const MAX_NAME_LEN: usize = 50;

/// A group of related categories (e.g., "Bills", "Needs", "Wants")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub id: CategoryGroupId,
    pub owner: UserId,
    pub name: String,

    /// Sort order for display
    pub sort_order: i32,

    #[serde(default)]
    pub hidden: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CategoryGroup {
    pub fn new(owner: UserId, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryGroupId::new(),
            owner,
            name: name.into(),
            sort_order: 0,
            hidden: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        validate_name(&self.name)
    }
}

impl fmt::Display for CategoryGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A budget category within a group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub owner: UserId,
    pub group_id: CategoryGroupId,
    pub name: String,

    /// Sort order within the group
    pub sort_order: i32,

    /// Hidden categories still count toward totals
    #[serde(default)]
    pub hidden: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(owner: UserId, name: impl Into<String>, group_id: CategoryGroupId) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            owner,
            group_id,
            name: name.into(),
            sort_order: 0,
            hidden: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        validate_name(&self.name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

fn validate_name(name: &str) -> Result<(), CategoryValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CategoryValidationError::EmptyName);
    }
    if name.len() > MAX_NAME_LEN {
        return Err(CategoryValidationError::NameTooLong(name.len()));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Name too long ({} chars, max {})", len, MAX_NAME_LEN)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation() {
        let owner = UserId::new();
        let group = CategoryGroup::new(owner, "Bills");
        assert!(group.validate().is_ok());

        let blank = Category::new(owner, "  ", group.id);
        assert_eq!(blank.validate(), Err(CategoryValidationError::EmptyName));

        let long = Category::new(owner, "x".repeat(51), group.id);
        assert_eq!(long.validate(), Err(CategoryValidationError::NameTooLong(51)));
    }
}
