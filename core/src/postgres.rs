//! `PostgreSQL` store using a `sqlx` connection pool.
//!
//! # Table Schema
//!
//! ```sql
//! CREATE TABLE todo (
//!     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     task TEXT NOT NULL CHECK (task <> ''),
//!     is_done BOOLEAN NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     deleted_at TIMESTAMPTZ NULL
//! );
//! ```
//!
//! Every statement filters on `deleted_at IS NULL`, so soft-deleted rows are
//! invisible to reads and immune to further writes.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entity::{NewTodo, Todo};
use crate::error::StoreError;
use crate::store::TodoStore;

const COLUMNS: &str = "id, task, is_done, created_at, updated_at, deleted_at";

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `url`.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Apply the embedded migrations in `core/migrations`.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.into()))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TodoStore for PgStore {
    async fn find_all(&self) -> Result<Vec<Todo>, StoreError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM todo WHERE deleted_at IS NULL ORDER BY created_at ASC, id ASC"
        );
        let todos = sqlx::query_as::<_, Todo>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(todos)
    }

    async fn find_by_id_or_fail(&self, id: Uuid) -> Result<Todo, StoreError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM todo WHERE id = $1 AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, Todo>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    async fn create(&self, input: NewTodo) -> Result<Todo, StoreError> {
        let sql = format!(
            "INSERT INTO todo (id, task, is_done) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        let todo = sqlx::query_as::<_, Todo>(&sql)
            .bind(Uuid::new_v4())
            .bind(input.task)
            .bind(input.is_done)
            .fetch_one(&self.pool)
            .await?;
        Ok(todo)
    }

    async fn save(&self, todo: &Todo) -> Result<Todo, StoreError> {
        let sql = format!(
            "UPDATE todo SET task = $2, is_done = $3, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Todo>(&sql)
            .bind(todo.id)
            .bind(&todo.task)
            .bind(todo.is_done)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(todo.id))
    }

    async fn soft_delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result =
            sqlx::query("UPDATE todo SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .execute(&self.pool)
                .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
