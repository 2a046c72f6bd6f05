//! Server binary: loads config, opens the store, mounts common and todo routes.

use std::sync::Arc;
use todo_api::{app, ensure_database_exists, ensure_todos_table, AppConfig, AppState, ConfigError, PgTodoStore, StoreBackend};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("todo_api=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let state = match config.store {
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store; data is lost on exit");
            AppState::in_memory()
        }
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or(ConfigError::Missing("DATABASE_URL"))?;
            ensure_database_exists(database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(database_url)
                .await?;
            ensure_todos_table(&pool, &config.schema).await?;
            AppState::new(Arc::new(PgTodoStore::new(pool, &config.schema)))
        }
    };

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state, config.body_limit)).await?;
    Ok(())
}
