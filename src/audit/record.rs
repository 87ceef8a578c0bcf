//! Audit record data structures
//!
//! Defines the operation and entity kinds that get audited and the record
//! written for each one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Types of operations that can be audited
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

/// Types of entities that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    User,
    Entry,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityType::User => write!(f, "User"),
            EntityType::Entry => write!(f, "Entry"),
        }
    }
}

/// A single audit log record
///
/// Records one operation on an entity with optional before/after snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub entity_type: EntityType,

    pub entity_id: String,

    /// Human-readable label (entry description, user email)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// Snapshot before the operation (updates/deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// Snapshot after the operation (creates/updates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditRecord {
    fn blank(operation: Operation, entity_type: EntityType, entity_id: String) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id,
            entity_name: None,
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    /// Record a create operation
    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            entity_name,
            after: serde_json::to_value(entity).ok(),
            ..Self::blank(Operation::Create, entity_type, entity_id.into())
        }
    }

    /// Record an update operation
    ///
    /// `before` is `None` when the entity was not stored yet; no diff is
    /// computed then.
    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: Option<&T>,
        after: &T,
    ) -> Self {
        let before = before.and_then(|b| serde_json::to_value(b).ok());
        let after = serde_json::to_value(after).ok();
        let diff_summary = match (&before, &after) {
            (Some(b), Some(a)) => super::generate_diff(b, a),
            _ => None,
        };

        Self {
            entity_name,
            before,
            after,
            diff_summary,
            ..Self::blank(Operation::Update, entity_type, entity_id.into())
        }
    }

    /// Record a delete operation
    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            entity_name,
            before: serde_json::to_value(entity).ok(),
            ..Self::blank(Operation::Delete, entity_type, entity_id.into())
        }
    }

    /// Format the record for human-readable output
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
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Delete.to_string(), "DELETE");
        assert_eq!(EntityType::Entry.to_string(), "Entry");
    }

    #[test]
    fn test_create_record() {
        let data = json!({"description": "Salário", "value": 1000});
        let record = AuditRecord::create(
            EntityType::Entry,
            "ent-1",
            Some("Salário".to_string()),
            &data,
        );

        assert_eq!(record.operation, Operation::Create);
        assert!(record.before.is_none());
        assert!(record.after.is_some());
    }

    #[test]
    fn test_update_record_computes_diff() {
        let before = json!({"status": "pending", "value": 1000});
        let after = json!({"status": "settled", "value": 1000});

        let record = AuditRecord::update(EntityType::Entry, "ent-1", None, Some(&before), &after);

        assert_eq!(record.operation, Operation::Update);
        assert_eq!(
            record.diff_summary.as_deref(),
            Some("status: \"pending\" -> \"settled\"")
        );
    }

    #[test]
    fn test_update_record_without_previous_state() {
        let after = json!({"status": "settled"});

        let record = AuditRecord::update(EntityType::Entry, "ent-9", None, None, &after);

        assert_eq!(record.operation, Operation::Update);
        assert!(record.before.is_none());
        assert!(record.after.is_some());
        assert!(record.diff_summary.is_none());
    }

    #[test]
    fn test_delete_record() {
        let record = AuditRecord::delete(EntityType::Entry, "ent-1", None, &json!({"id": 1}));
        assert!(record.before.is_some());
        assert!(record.after.is_none());
    }

    #[test]
    fn test_human_readable_format() {
        let record = AuditRecord::create(
            EntityType::User,
            "usr-1",
            Some("maria@email.com".to_string()),
            &json!({"name": "Maria"}),
        );

        let formatted = record.format_human_readable();
        assert!(formatted.contains("CREATE User usr-1"));
        assert!(formatted.contains("maria@email.com"));
    }
}
