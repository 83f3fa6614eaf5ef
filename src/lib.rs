//! Blog GraphQL API: users, posts and tags over PostgreSQL.

pub mod config;
pub mod error;
pub mod graphql;
pub mod migration;
pub mod model;
pub mod repository;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use error::{AppError, ConfigError};
pub use graphql::{build_schema, BlogSchema};
pub use migration::apply_migrations;
pub use repository::{MemoryRepository, PgRepository, Repository};
pub use routes::app;
pub use service::BlogService;
pub use state::AppState;
pub use store::{connect, ensure_database_exists};
