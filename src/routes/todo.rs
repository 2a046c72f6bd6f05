//! Todo CRUD routes.

use crate::handlers::todo::{create, delete, list, read};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn todo_routes(state: AppState) -> Router {
    Router::new()
        .route("/todos", get(list).post(create))
        .route("/todos/:id", get(read).delete(delete))
        .with_state(state)
}
