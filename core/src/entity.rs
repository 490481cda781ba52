//! Persistence record for a todo item.
//!
//! # Design
//! `Todo` is both the row shape of the `todo` table (`sqlx::FromRow`, snake_case
//! columns) and the JSON shape returned by the API (camelCase keys). A record
//! whose `deleted_at` is set has been soft-deleted: the row stays in storage but
//! no standard read returns it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single todo item as stored and as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: Uuid,
    pub task: String,
    pub is_done: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Todo {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Field values for a row that does not exist yet. The store assigns the id
/// and the timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub task: String,
    pub is_done: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Todo {
        let now = Utc::now();
        Todo {
            id: Uuid::nil(),
            task: "Test".to_string(),
            is_done: false,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn todo_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["task"], "Test");
        assert_eq!(json["isDone"], false);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json["deletedAt"].is_null());
        assert!(json.get("is_done").is_none());
    }

    #[test]
    fn deleted_at_marks_record_deleted() {
        let mut todo = sample();
        assert!(!todo.is_deleted());
        todo.deleted_at = Some(Utc::now());
        assert!(todo.is_deleted());
    }
}
