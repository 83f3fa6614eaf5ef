//! Create the schema, tables, foreign keys and indexes for users, posts and tags.
//! Order follows PostgreSQL dependencies: schema, users, posts, tags, then indexes.

use crate::error::AppError;
use crate::sql::{qualified_table, quoted, POSTS, TAGS, USERS};
use sqlx::PgPool;

/// DDL statements in execution order. Every statement is idempotent.
pub fn migration_statements(schema: &str) -> Vec<String> {
    let users = qualified_table(schema, USERS);
    let posts = qualified_table(schema, POSTS);
    let tags = qualified_table(schema, TAGS);

    vec![
        format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(schema)),
        format!(
            r#"CREATE TABLE IF NOT EXISTS {} (
  id SERIAL PRIMARY KEY,
  email TEXT NOT NULL UNIQUE,
  first_name TEXT,
  last_name TEXT
)"#,
            users
        ),
        format!(
            r#"CREATE TABLE IF NOT EXISTS {} (
  id SERIAL PRIMARY KEY,
  title TEXT NOT NULL,
  content TEXT,
  published BOOLEAN NOT NULL DEFAULT FALSE,
  author_id INTEGER NOT NULL REFERENCES {} (id) ON UPDATE CASCADE ON DELETE NO ACTION
)"#,
            posts, users
        ),
        // Tags are not cascaded: deleting a post that still has tags fails.
        format!(
            r#"CREATE TABLE IF NOT EXISTS {} (
  id SERIAL PRIMARY KEY,
  title TEXT NOT NULL,
  post_id INTEGER NOT NULL REFERENCES {} (id) ON UPDATE CASCADE ON DELETE NO ACTION
)"#,
            tags, posts
        ),
        format!(
            "CREATE INDEX IF NOT EXISTS {} ON {} (author_id)",
            quoted("posts_author_id_idx"),
            posts
        ),
        format!(
            "CREATE INDEX IF NOT EXISTS {} ON {} (post_id)",
            quoted("tags_post_id_idx"),
            tags
        ),
    ]
}

/// Apply the blog tables to `schema`. Safe to run on every startup.
pub async fn apply_migrations(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    for sql in migration_statements(schema) {
        tracing::debug!(sql = %sql, "migration");
        sqlx::query(&sql).execute(pool).await?;
    }
    tracing::info!(schema = %schema, "migrations applied");
    Ok(())
}
