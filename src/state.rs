//! Shared application state for all routes.

use crate::store::{MemoryTodoStore, TodoStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TodoStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    /// State over a fresh in-process store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTodoStore::new()))
    }
}
