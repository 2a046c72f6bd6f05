use super::TodoStore;
use crate::error::AppError;
use crate::model::{NewTodo, Todo, TodoId};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// In-process store. Records are kept in insertion order.
#[derive(Default)]
pub struct MemoryTodoStore {
    todos: RwLock<Vec<Todo>>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn insert(&self, new: NewTodo) -> Result<Todo, AppError> {
        let todo = new.into_todo(TodoId::new());
        self.todos.write().await.push(todo.clone());
        Ok(todo)
    }

    async fn find_all(&self) -> Result<Vec<Todo>, AppError> {
        Ok(self.todos.read().await.clone())
    }

    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, AppError> {
        let todos = self.todos.read().await;
        Ok(todos.iter().find(|t| t.id == *id).cloned())
    }

    async fn delete_by_id(&self, id: &TodoId) -> Result<Option<Todo>, AppError> {
        let mut todos = self.todos.write().await;
        Ok(todos
            .iter()
            .position(|t| t.id == *id)
            .map(|idx| todos.remove(idx)))
    }
}
