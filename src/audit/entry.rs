//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::UserId;

/// Kind of change recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// Record kinds that go through the audit log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Account,
    Transaction,
    Category,
    CategoryGroup,
    Assignment,
    Target,
    Event,
    OccurrenceException,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityType::Account => "Account",
            EntityType::Transaction => "Transaction",
            EntityType::Category => "Category",
            EntityType::CategoryGroup => "CategoryGroup",
            EntityType::Assignment => "Assignment",
            EntityType::Target => "Target",
            EntityType::Event => "Event",
            EntityType::OccurrenceException => "OccurrenceException",
        };
        write!(f, "{}", name)
    }
}

/// One line of the audit log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub owner: UserId,
    pub operation: Operation,
    pub entity_type: EntityType,
    pub entity_id: String,

    /// Human-readable label (account name, event title, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn blank(
        owner: UserId,
        operation: Operation,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            owner,
            operation,
            entity_type,
            entity_id,
            entity_name,
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    pub fn create<T: Serialize>(
        owner: UserId,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            after: serde_json::to_value(entity).ok(),
            ..Self::blank(owner, Operation::Create, entity_type, entity_id.into(), entity_name)
        }
    }

    /// Update entry; the diff is derived from the two snapshots when not given
    pub fn update<T: Serialize>(
        owner: UserId,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Self {
        let before = serde_json::to_value(before).ok();
        let after = serde_json::to_value(after).ok();
        let diff_summary = diff_summary.or_else(|| match (&before, &after) {
            (Some(b), Some(a)) => super::generate_diff(b, a),
            _ => None,
        });

        Self {
            before,
            after,
            diff_summary,
            ..Self::blank(owner, Operation::Update, entity_type, entity_id.into(), entity_name)
        }
    }

    pub fn delete<T: Serialize>(
        owner: UserId,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            before: serde_json::to_value(entity).ok(),
            ..Self::blank(owner, Operation::Delete, entity_type, entity_id.into(), entity_name)
        }
    }

    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_derives_diff() {
        let owner = UserId::new();
        let entry = AuditEntry::update(
            owner,
            EntityType::Assignment,
            "cat:2025-01",
            Some("Groceries".into()),
            &json!({"assigned": 1000}),
            &json!({"assigned": 2500}),
            None,
        );

        assert_eq!(entry.operation, Operation::Update);
        assert_eq!(entry.owner, owner);
        assert_eq!(entry.diff_summary.as_deref(), Some("assigned: 1000 -> 2500"));
    }

    #[test]
    fn test_create_and_delete_snapshots() {
        let owner = UserId::new();
        let event = json!({"title": "Standup"});

        let created = AuditEntry::create(owner, EntityType::Event, "evt-1", None, &event);
        assert!(created.before.is_none());
        assert!(created.after.is_some());

        let deleted = AuditEntry::delete(owner, EntityType::Event, "evt-1", None, &event);
        assert!(deleted.before.is_some());
        assert!(deleted.after.is_none());
    }

    #[test]
    fn test_entity_type_serialization() {
        let json = serde_json::to_string(&EntityType::OccurrenceException).unwrap();
        assert_eq!(json, "\"occurrence_exception\"");
        assert_eq!(EntityType::CategoryGroup.to_string(), "CategoryGroup");
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::create(
            UserId::new(),
            EntityType::Account,
            "acc-12345678",
            Some("Checking".to_string()),
            &json!({"name": "Checking"}),
        );

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("CREATE Account acc-12345678 (Checking)"));
    }
}
