//! In-process store backed by a shared map.
//!
//! Rows are never removed from the map; soft-deleted rows stay behind with
//! `deleted_at` set, the same way they would in the database table.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::entity::{NewTodo, Todo};
use crate::error::StoreError;
use crate::store::TodoStore;

pub type Db = Arc<RwLock<HashMap<Uuid, Todo>>>;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    db: Db,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows held, soft-deleted ones included.
    pub async fn row_count(&self) -> usize {
        self.db.read().await.len()
    }

    /// Raw row lookup that ignores the soft-delete filter.
    pub async fn row(&self, id: Uuid) -> Option<Todo> {
        self.db.read().await.get(&id).cloned()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Todo>, StoreError> {
        let todos = self.db.read().await;
        let mut live: Vec<Todo> = todos
            .values()
            .filter(|t| !t.is_deleted())
            .cloned()
            .collect();
        live.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(live)
    }

    async fn find_by_id_or_fail(&self, id: Uuid) -> Result<Todo, StoreError> {
        let todos = self.db.read().await;
        todos
            .get(&id)
            .filter(|t| !t.is_deleted())
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn create(&self, input: NewTodo) -> Result<Todo, StoreError> {
        let now = Utc::now();
        let mut todos = self.db.write().await;
        let mut id = Uuid::new_v4();
        while todos.contains_key(&id) {
            id = Uuid::new_v4();
        }
        let todo = Todo {
            id,
            task: input.task,
            is_done: input.is_done,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        todos.insert(id, todo.clone());
        Ok(todo)
    }

    async fn save(&self, todo: &Todo) -> Result<Todo, StoreError> {
        let mut todos = self.db.write().await;
        let stored = todos
            .get_mut(&todo.id)
            .filter(|t| !t.is_deleted())
            .ok_or(StoreError::NotFound(todo.id))?;
        stored.task = todo.task.clone();
        stored.is_done = todo.is_done;
        stored.updated_at = Utc::now().max(stored.updated_at);
        Ok(stored.clone())
    }

    async fn soft_delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut todos = self.db.write().await;
        let stored = todos
            .get_mut(&id)
            .filter(|t| !t.is_deleted())
            .ok_or(StoreError::NotFound(id))?;
        stored.deleted_at = Some(Utc::now());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_todo(task: &str) -> NewTodo {
        NewTodo {
            task: task.to_string(),
            is_done: false,
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_timestamps() {
        let store = MemoryStore::new();
        let todo = store.create(new_todo("Buy milk")).await.unwrap();
        assert_eq!(todo.task, "Buy milk");
        assert!(!todo.is_done);
        assert_eq!(todo.created_at, todo.updated_at);
        assert!(todo.deleted_at.is_none());
        assert_eq!(store.find_by_id_or_fail(todo.id).await.unwrap(), todo);
    }

    #[tokio::test]
    async fn find_all_is_ordered_by_creation() {
        let store = MemoryStore::new();
        let first = store.create(new_todo("first")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let second = store.create(new_todo("second")).await.unwrap();

        let ids: Vec<Uuid> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn save_keeps_identity_and_creation_time() {
        let store = MemoryStore::new();
        let created = store.create(new_todo("Walk dog")).await.unwrap();

        let mut changed = created.clone();
        changed.task = "Walk cat".to_string();
        changed.is_done = true;
        changed.created_at = Utc::now() + chrono::Duration::days(1);
        let saved = store.save(&changed).await.unwrap();

        assert_eq!(saved.id, created.id);
        assert_eq!(saved.created_at, created.created_at);
        assert_eq!(saved.task, "Walk cat");
        assert!(saved.is_done);
        assert!(saved.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn soft_delete_hides_row_but_keeps_it() {
        let store = MemoryStore::new();
        let todo = store.create(new_todo("Walk dog")).await.unwrap();

        store.soft_delete(todo.id).await.unwrap();

        assert!(matches!(
            store.find_by_id_or_fail(todo.id).await,
            Err(StoreError::NotFound(id)) if id == todo.id
        ));
        assert!(store.find_all().await.unwrap().is_empty());
        assert_eq!(store.row_count().await, 1);

        let row = store.row(todo.id).await.unwrap();
        assert!(row.deleted_at.is_some());
        assert_eq!(row.task, todo.task);
        assert_eq!(row.updated_at, todo.updated_at);
    }

    #[tokio::test]
    async fn deleted_rows_cannot_be_saved_or_deleted_again() {
        let store = MemoryStore::new();
        let todo = store.create(new_todo("Walk dog")).await.unwrap();
        store.soft_delete(todo.id).await.unwrap();
        let deleted_at = store.row(todo.id).await.unwrap().deleted_at;

        assert!(matches!(
            store.save(&todo).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.soft_delete(todo.id).await,
            Err(StoreError::NotFound(_))
        ));
        assert_eq!(store.row(todo.id).await.unwrap().deleted_at, deleted_at);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.find_by_id_or_fail(Uuid::nil()).await,
            Err(StoreError::NotFound(_))
        ));
    }
}
