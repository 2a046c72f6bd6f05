//! PostgreSQL-backed store: one `todos` table in a configurable schema.

use super::TodoStore;
use crate::error::{AppError, ConfigError};
use crate::model::{NewTodo, Todo, TodoId};
use async_trait::async_trait;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;
use uuid::Uuid;

type TodoRow = (Uuid, String, bool);

fn row_to_todo((id, text, completed): TodoRow) -> Todo {
    Todo {
        id: id.into(),
        text,
        completed,
    }
}

#[derive(Clone)]
pub struct PgTodoStore {
    pool: PgPool,
    table: String,
}

impl PgTodoStore {
    /// `schema` must already exist (see [`ensure_todos_table`]).
    pub fn new(pool: PgPool, schema: &str) -> Self {
        Self {
            pool,
            table: qualified_table(schema),
        }
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
    async fn insert(&self, new: NewTodo) -> Result<Todo, AppError> {
        let id = TodoId::new();
        let row: TodoRow = sqlx::query_as(&format!(
            "INSERT INTO {} (id, text, completed) VALUES ($1, $2, FALSE) RETURNING id, text, completed",
            self.table
        ))
        .bind(id.as_uuid())
        .bind(new.text())
        .fetch_one(&self.pool)
        .await?;
        Ok(row_to_todo(row))
    }

    async fn find_all(&self) -> Result<Vec<Todo>, AppError> {
        let rows: Vec<TodoRow> = sqlx::query_as(&format!(
            "SELECT id, text, completed FROM {} ORDER BY seq",
            self.table
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(row_to_todo).collect())
    }

    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, AppError> {
        let row: Option<TodoRow> = sqlx::query_as(&format!(
            "SELECT id, text, completed FROM {} WHERE id = $1",
            self.table
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(row_to_todo))
    }

    async fn delete_by_id(&self, id: &TodoId) -> Result<Option<Todo>, AppError> {
        let row: Option<TodoRow> = sqlx::query_as(&format!(
            "DELETE FROM {} WHERE id = $1 RETURNING id, text, completed",
            self.table
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(row_to_todo))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn qualified_table(schema: &str) -> String {
    format!("{}.todos", quote_ident(schema))
}

/// Create `schema` if missing, then the `todos` table. `seq` orders listing by insertion.
pub async fn ensure_todos_table(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quote_ident(schema)))
        .execute(pool)
        .await?;
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            seq BIGSERIAL NOT NULL,
            id UUID PRIMARY KEY,
            text TEXT NOT NULL CHECK (btrim(text) <> ''),
            completed BOOLEAN NOT NULL DEFAULT FALSE
        )
        "#,
        qualified_table(schema)
    );
    sqlx::query(&ddl).execute(pool).await?;
    tracing::debug!(schema, "todos table ready");
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url[scheme_end..]
        .find('/')
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| ConfigError::Invalid {
            key: "DATABASE_URL",
            value: redact_credentials(url),
        })?;
    let path_and_query = &url[path_start..];
    let (db_name, query) = match path_and_query.split_once('?') {
        Some((name, q)) => (name.trim(), Some(q)),
        None => (path_and_query.trim(), None),
    };
    let mut admin_url = format!("{}postgres", &url[..path_start]);
    if let Some(q) = query {
        admin_url.push('?');
        admin_url.push_str(q);
    }
    Ok((admin_url, db_name.to_string()))
}

/// Hide `user:password@` so the URL can appear in errors and logs.
fn redact_credentials(url: &str) -> String {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    match url[scheme_end..].rfind('@') {
        Some(at) => format!("{}***{}", &url[..scheme_end], &url[scheme_end + at..]),
        None => url.to_string(),
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
