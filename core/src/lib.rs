//! Domain core of the todo service.
//!
//! # Overview
//! Holds the persisted record, the request payloads and their validation,
//! the store capability trait with its in-memory and `PostgreSQL`
//! implementations, and the service that sits between the HTTP layer and the
//! store.
//!
//! # Design
//! - `TodoService` owns an `Arc<dyn TodoStore>`; the backend is chosen by the
//!   caller at startup.
//! - Records are soft-deleted: `deleted_at` is set and every read filters it.
//! - The single-record lookup is the only place a store failure becomes
//!   `ServiceError::NotFound`; every other failure propagates as-is.

pub mod dto;
pub mod entity;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod service;
pub mod store;

pub use dto::{CreateTodo, FieldError, UpdateTodo, Validate, ValidationError};
pub use entity::{NewTodo, Todo};
pub use error::{ServiceError, StoreError};
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use service::TodoService;
pub use store::TodoStore;
