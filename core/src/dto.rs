//! Request payloads accepted at the controller boundary.
//!
//! # Design
//! Serde enforces presence and type of each field; `Validate` enforces the
//! rules serde cannot express (non-empty task). Both failures surface as a
//! client error before the service is reached.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entity::{NewTodo, Todo};

/// A single failing field and the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Every field that failed validation in one payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed: {}", summary(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{} {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Payload-level rules checked after deserialization.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Collects field errors and turns them into a result once all rules ran.
#[derive(Default)]
struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    fn not_empty(&mut self, field: &str, value: &str) {
        if value.is_empty() {
            self.errors
                .push(FieldError::new(field, "should not be empty"));
        }
    }

    fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                errors: self.errors,
            })
        }
    }
}

/// Request payload for creating a new todo. Both fields are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    pub task: String,
    pub is_done: bool,
}

impl Validate for CreateTodo {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut checker = Checker::default();
        checker.not_empty("task", &self.task);
        checker.finish()
    }
}

impl From<CreateTodo> for NewTodo {
    fn from(input: CreateTodo) -> Self {
        NewTodo {
            task: input.task,
            is_done: input.is_done,
        }
    }
}

/// Request payload for updating an existing todo. Only the fields present in
/// the JSON are applied; omitted fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_done: Option<bool>,
}

impl Validate for UpdateTodo {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut checker = Checker::default();
        if let Some(task) = &self.task {
            checker.not_empty("task", task);
        }
        checker.finish()
    }
}

impl UpdateTodo {
    /// Copy the provided fields onto `todo`. Identity and timestamps are left
    /// for the store.
    pub fn merge_into(self, todo: &mut Todo) {
        if let Some(task) = self.task {
            todo.task = task;
        }
        if let Some(is_done) = self.is_done {
            todo.is_done = is_done;
        }
    }
}
