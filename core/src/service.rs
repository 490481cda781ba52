//! Business operations over a `TodoStore`.
//!
//! # Design
//! The store is handed in at construction; nothing is looked up from a global
//! registry. `update_by_id` and `delete_by_id` always run `find_one_or_fail`
//! first, so an unknown or soft-deleted id is reported as `NotFound` instead
//! of turning into a silent no-op.

use std::sync::Arc;

use uuid::Uuid;

use crate::dto::{CreateTodo, UpdateTodo};
use crate::entity::Todo;
use crate::error::ServiceError;
use crate::store::TodoStore;

#[derive(Clone)]
pub struct TodoService {
    store: Arc<dyn TodoStore>,
}

impl TodoService {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    pub async fn find_all(&self) -> Result<Vec<Todo>, ServiceError> {
        let todos = self.store.find_all().await?;
        tracing::debug!(count = todos.len(), "listed todos");
        Ok(todos)
    }

    pub async fn create(&self, input: CreateTodo) -> Result<Todo, ServiceError> {
        let todo = self.store.create(input.into()).await?;
        tracing::debug!(id = %todo.id, "created todo");
        Ok(todo)
    }

    /// Fetch one live todo. Any lookup failure, not only a missing row, is
    /// reported as `ServiceError::NotFound`.
    pub async fn find_one_or_fail(&self, id: Uuid) -> Result<Todo, ServiceError> {
        self.store.find_by_id_or_fail(id).await.map_err(|error| {
            tracing::warn!(%id, %error, "todo lookup failed");
            ServiceError::NotFound {
                id,
                reason: error.to_string(),
            }
        })
    }

    pub async fn update_by_id(&self, id: Uuid, input: UpdateTodo) -> Result<Todo, ServiceError> {
        let mut todo = self.find_one_or_fail(id).await?;
        input.merge_into(&mut todo);
        let saved = self.store.save(&todo).await?;
        tracing::debug!(%id, "updated todo");
        Ok(saved)
    }

    pub async fn delete_by_id(&self, id: Uuid) -> Result<(), ServiceError> {
        self.find_one_or_fail(id).await?;
        self.store.soft_delete(id).await?;
        tracing::debug!(%id, "soft-deleted todo");
        Ok(())
    }
}
