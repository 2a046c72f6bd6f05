//! Response envelopes for the todo routes.

use crate::model::Todo;
use serde::{Deserialize, Serialize};

/// `{ "todo": ... }` for get and delete.
#[derive(Debug, Serialize, Deserialize)]
pub struct TodoBody {
    pub todo: Todo,
}

/// `{ "todos": [...] }` for list.
#[derive(Debug, Serialize, Deserialize)]
pub struct TodosBody {
    pub todos: Vec<Todo>,
}
