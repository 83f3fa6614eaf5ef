//! Server settings read from the environment (`.env` is loaded by the binary before this runs).

use crate::error::ConfigError;
use std::net::SocketAddr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/blog";
pub const DEFAULT_SCHEMA: &str = "public";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:4000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub database_url: String,
    /// PostgreSQL schema holding users, posts and tags.
    pub schema: String,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
    pub max_query_depth: Option<usize>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        if !database_url.starts_with("postgres://") && !database_url.starts_with("postgresql://") {
            return Err(ConfigError::Invalid {
                var: "DATABASE_URL",
                message: "expected a postgres:// or postgresql:// url".into(),
            });
        }

        let schema = get("DATABASE_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.into());
        if !is_plain_identifier(&schema) {
            return Err(ConfigError::Invalid {
                var: "DATABASE_SCHEMA",
                message: format!("'{}' is not a plain identifier", schema),
            });
        }

        let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v.trim().parse::<u32>().ok().filter(|n| *n > 0).ok_or_else(|| {
                ConfigError::Invalid {
                    var: "DATABASE_MAX_CONNECTIONS",
                    message: format!("'{}' is not a positive integer", v),
                }
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = bind_raw.trim().parse::<SocketAddr>().map_err(|e| ConfigError::Invalid {
            var: "BIND_ADDR",
            message: e.to_string(),
        })?;

        let max_query_depth = match get("GRAPHQL_MAX_DEPTH") {
            Some(v) => Some(v.trim().parse::<usize>().ok().filter(|n| *n > 0).ok_or_else(|| {
                ConfigError::Invalid {
                    var: "GRAPHQL_MAX_DEPTH",
                    message: format!("'{}' is not a positive integer", v),
                }
            })?),
            None => None,
        };

        Ok(ServerConfig {
            database_url,
            schema,
            max_connections,
            bind_addr,
            max_query_depth,
        })
    }
}

/// Lowercase ASCII letters, digits and underscores, not starting with a digit.
pub fn is_plain_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_lowercase() => {}
        _ => return false,
    }
    s.len() <= 63 && chars.all(|c| c == '_' || c.is_ascii_lowercase() || c.is_ascii_digit())
}
