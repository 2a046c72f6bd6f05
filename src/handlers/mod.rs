//! HTTP handlers for todo CRUD.

pub mod todo;
