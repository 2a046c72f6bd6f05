//! Process configuration from environment variables (after `.env` is loaded).

use crate::error::ConfigError;
use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_SCHEMA: &str = "public";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreBackend,
    pub database_url: Option<String>,
    /// Schema holding the `todos` table. Plain identifier only.
    pub schema: String,
    pub max_connections: u32,
    pub body_limit: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr: SocketAddr = bind_raw.parse().map_err(|_| ConfigError::Invalid {
            key: "BIND_ADDR",
            value: bind_raw.clone(),
        })?;

        let store = match lookup("TODO_STORE").as_deref().map(str::to_ascii_lowercase).as_deref() {
            None | Some("postgres") => StoreBackend::Postgres,
            Some("memory") => StoreBackend::Memory,
            Some(other) => return Err(ConfigError::UnknownStore(other.to_string())),
        };

        let database_url = lookup("DATABASE_URL").filter(|s| !s.is_empty());
        if store == StoreBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let schema = lookup("TODO_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.into());
        if !is_plain_identifier(&schema) {
            return Err(ConfigError::Invalid {
                key: "TODO_SCHEMA",
                value: schema,
            });
        }

        let max_connections = parse_or("DB_MAX_CONNECTIONS", &lookup, DEFAULT_MAX_CONNECTIONS)?;
        let body_limit = parse_or("BODY_LIMIT_BYTES", &lookup, DEFAULT_BODY_LIMIT)?;

        Ok(Self {
            bind_addr,
            store,
            database_url,
            schema,
            max_connections,
            body_limit,
        })
    }
}

fn parse_or<T, F>(key: &'static str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid { key, value: v }),
    }
}

fn is_plain_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && s.len() <= 63
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn defaults_with_database_url() {
        let cfg = config(&[("DATABASE_URL", "postgres://localhost/todos")]).unwrap();
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR.parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.store, StoreBackend::Postgres);
        assert_eq!(cfg.schema, "public");
        assert_eq!(cfg.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(cfg.body_limit, DEFAULT_BODY_LIMIT);
    }

    #[test]
    fn postgres_requires_database_url() {
        assert!(matches!(config(&[]), Err(ConfigError::Missing("DATABASE_URL"))));
    }

    #[test]
    fn memory_store_needs_no_database() {
        let cfg = config(&[("TODO_STORE", "Memory"), ("BIND_ADDR", "127.0.0.1:8080")]).unwrap();
        assert_eq!(cfg.store, StoreBackend::Memory);
        assert_eq!(cfg.bind_addr.port(), 8080);
        assert!(cfg.database_url.is_none());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            config(&[("TODO_STORE", "mongo")]),
            Err(ConfigError::UnknownStore(_))
        ));
        assert!(matches!(
            config(&[("TODO_STORE", "memory"), ("BIND_ADDR", "nowhere")]),
            Err(ConfigError::Invalid { key: "BIND_ADDR", .. })
        ));
        assert!(matches!(
            config(&[("TODO_STORE", "memory"), ("TODO_SCHEMA", "drop table;")]),
            Err(ConfigError::Invalid { key: "TODO_SCHEMA", .. })
        ));
        assert!(matches!(
            config(&[("TODO_STORE", "memory"), ("BODY_LIMIT_BYTES", "lots")]),
            Err(ConfigError::Invalid { key: "BODY_LIMIT_BYTES", .. })
        ));
    }
}
