//! Todo API: a REST backend for a Todo list over a pluggable document store.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;

pub use config::{AppConfig, StoreBackend};
pub use error::{AppError, ConfigError};
pub use model::{NewTodo, Todo, TodoId};
pub use response::{TodoBody, TodosBody};
pub use routes::{app, common_routes, todo_routes};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_todos_table, MemoryTodoStore, PgTodoStore, TodoStore};
