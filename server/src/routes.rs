//! Handlers for the `/todo` resource. Each one validates its input through the
//! extractors and hands off to a single `TodoService` operation.

use axum::{extract::State, http::StatusCode, Json};
use todo_core::{CreateTodo, Todo, UpdateTodo};

use crate::error::ApiError;
use crate::extract::{TodoId, ValidJson};
use crate::AppState;

pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = state.service.find_all().await?;
    Ok(Json(todos))
}

pub async fn create_todo(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let todo = state.service.create(input).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn get_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
) -> Result<Json<Todo>, ApiError> {
    let todo = state.service.find_one_or_fail(id).await?;
    Ok(Json(todo))
}

pub async fn update_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
    ValidJson(input): ValidJson<UpdateTodo>,
) -> Result<Json<Todo>, ApiError> {
    let todo = state.service.update_by_id(id, input).await?;
    Ok(Json(todo))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
) -> Result<StatusCode, ApiError> {
    state.service.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
