//! The capability set the service needs from persistence.
//!
//! # Design
//! Every implementation must uphold the soft-delete contract: reads never
//! return a row whose `deleted_at` is set, `save` and `soft_delete` only touch
//! live rows, and `deleted_at` is never cleared once written.

use async_trait::async_trait;
use uuid::Uuid;

use crate::entity::{NewTodo, Todo};
use crate::error::StoreError;

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// All live rows, oldest first.
    async fn find_all(&self) -> Result<Vec<Todo>, StoreError>;

    /// The live row with `id`, or `StoreError::NotFound`.
    async fn find_by_id_or_fail(&self, id: Uuid) -> Result<Todo, StoreError>;

    /// Insert a row. The store assigns the id and sets both timestamps.
    async fn create(&self, input: NewTodo) -> Result<Todo, StoreError>;

    /// Persist `task` and `is_done` of a live row and refresh `updated_at`.
    /// `id` and `created_at` are never changed.
    async fn save(&self, todo: &Todo) -> Result<Todo, StoreError>;

    /// Set `deleted_at` on a live row.
    async fn soft_delete(&self, id: Uuid) -> Result<(), StoreError>;
}
