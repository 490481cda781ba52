//! HTTP front end for the todo service.
//!
//! # Overview
//! Routes live under `/api`:
//!
//! | Route            | Method | Success                |
//! |------------------|--------|------------------------|
//! | `/api/todo`      | GET    | 200 + list             |
//! | `/api/todo`      | POST   | 201 + created record   |
//! | `/api/todo/{id}` | GET    | 200 + record           |
//! | `/api/todo/{id}` | PUT    | 200 + updated record   |
//! | `/api/todo/{id}` | DELETE | 204, empty body        |
//!
//! Invalid bodies and non-UUID ids are 400, unknown or deleted ids are 404.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;

use std::sync::Arc;

use axum::{routing::get, Router};
use todo_core::{MemoryStore, PgStore, StoreError, TodoService, TodoStore};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::Storage;

#[derive(Clone)]
pub struct AppState {
    pub service: TodoService,
}

impl AppState {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self {
            service: TodoService::new(store),
        }
    }

    /// State backed by a fresh `MemoryStore`.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }
}

pub fn app(state: AppState) -> Router {
    let todo = Router::new()
        .route("/todo", get(routes::list_todos).post(routes::create_todo))
        .route(
            "/todo/{id}",
            get(routes::get_todo)
                .put(routes::update_todo)
                .delete(routes::delete_todo),
        );

    Router::new()
        .nest("/api", todo)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Open the configured store. Postgres migrations run before the store is
/// handed out.
pub async fn open_store(storage: &Storage) -> Result<Arc<dyn TodoStore>, StoreError> {
    match storage {
        Storage::Memory => Ok(Arc::new(MemoryStore::new())),
        Storage::Postgres {
            url,
            max_connections,
        } => {
            let store = PgStore::connect(url, *max_connections).await?;
            store.migrate().await?;
            Ok(Arc::new(store))
        }
    }
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "failed to install ctrl-c handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
