//! Document store abstraction over the `todos` collection.

mod memory;
mod postgres;

pub use memory::MemoryTodoStore;
pub use postgres::{ensure_database_exists, ensure_todos_table, PgTodoStore};

use crate::error::AppError;
use crate::model::{NewTodo, Todo, TodoId};
use async_trait::async_trait;

/// CRUD over persisted todos. Each call is one independent operation against the store.
#[async_trait]
pub trait TodoStore: Send + Sync {
    async fn insert(&self, new: NewTodo) -> Result<Todo, AppError>;

    /// All records in insertion order.
    async fn find_all(&self) -> Result<Vec<Todo>, AppError>;

    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, AppError>;

    /// Remove and return the record, or `None` if absent.
    async fn delete_by_id(&self, id: &TodoId) -> Result<Option<Todo>, AppError>;

    /// Connectivity check used by readiness.
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
