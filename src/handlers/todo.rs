//! Todo handlers: create, list, read, delete.

use crate::error::AppError;
use crate::model::{NewTodo, TodoId};
use crate::response::{TodoBody, TodosBody};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

/// Malformed ids are reported exactly like absent ones.
fn parse_id(id_str: &str) -> Result<TodoId, AppError> {
    TodoId::parse(id_str).ok_or_else(|| AppError::NotFound(format!("todo {}", id_str)))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let new = NewTodo::from_body(body)?;
    let todo = state.store.insert(new).await?;
    tracing::info!(id = %todo.id, "todo created");
    Ok((StatusCode::OK, Json(todo)))
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let todos = state.store.find_all().await?;
    tracing::debug!(count = todos.len(), "todos listed");
    Ok((StatusCode::OK, Json(TodosBody { todos })))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let todo = state
        .store
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("todo {}", id_str)))?;
    Ok((StatusCode::OK, Json(TodoBody { todo })))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let todo = state
        .store
        .delete_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("todo {}", id_str)))?;
    tracing::info!(id = %todo.id, "todo deleted");
    Ok((StatusCode::OK, Json(TodoBody { todo })))
}
