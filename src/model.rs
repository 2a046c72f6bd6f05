//! Todo record, its identifier, and the create-time schema check.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// Store-assigned identifier. Serialized as the hyphenated lowercase UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(Uuid);

impl TodoId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a path id. Only the 36-character lowercase hyphenated form is
    /// well-formed, so a parsed id always displays as the input string.
    /// Anything else returns `None` so callers can treat it as absent.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.len() != 36 || raw.bytes().any(|b| b.is_ascii_uppercase()) {
            return None;
        }
        Uuid::try_parse(raw).ok().map(Self)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for TodoId {
    fn from(u: Uuid) -> Self {
        Self(u)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub text: String,
    pub completed: bool,
}

/// A todo that passed the schema check and may be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    text: String,
}

impl NewTodo {
    /// Validate a create body. `text` must be a non-blank string; other fields are ignored.
    pub fn from_body(body: Value) -> Result<Self, AppError> {
        let mut map = match body {
            Value::Object(m) => m,
            _ => return Err(AppError::Validation("body must be a JSON object".into())),
        };
        match map.remove("text") {
            None | Some(Value::Null) => Err(AppError::Validation("text is required".into())),
            Some(Value::String(s)) if s.trim().is_empty() => {
                Err(AppError::Validation("text must not be empty".into()))
            }
            Some(Value::String(text)) => Ok(Self { text }),
            Some(_) => Err(AppError::Validation("text must be a string".into())),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_todo(self, id: TodoId) -> Todo {
        Todo {
            id,
            text: self.text,
            completed: false,
        }
    }
}
