//! Repository backed by a shared PostgreSQL pool.

use super::Repository;
use crate::error::AppError;
use crate::model::{NewPost, NewTag, NewUser, Post, Tag, User};
use crate::sql::Statements;
use async_trait::async_trait;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
    sql: Statements,
}

impl PgRepository {
    pub fn new(pool: PgPool, schema: &str) -> Self {
        PgRepository {
            pool,
            sql: Statements::new(schema),
        }
    }
}

#[async_trait]
impl Repository for PgRepository {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_user(&self, id: i32) -> Result<Option<User>, AppError> {
        tracing::debug!(sql = %self.sql.select_user, id, "query");
        let row = sqlx::query_as::<_, User>(&self.sql.select_user)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_post(&self, id: i32) -> Result<Option<Post>, AppError> {
        tracing::debug!(sql = %self.sql.select_post, id, "query");
        let row = sqlx::query_as::<_, Post>(&self.sql.select_post)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn posts_by_author(&self, author_id: i32) -> Result<Vec<Post>, AppError> {
        tracing::debug!(sql = %self.sql.posts_by_author, author_id, "query");
        let rows = sqlx::query_as::<_, Post>(&self.sql.posts_by_author)
            .bind(author_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn tags_by_post(&self, post_id: i32) -> Result<Vec<Tag>, AppError> {
        tracing::debug!(sql = %self.sql.tags_by_post, post_id, "query");
        let rows = sqlx::query_as::<_, Tag>(&self.sql.tags_by_post)
            .bind(post_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create_user(&self, input: NewUser) -> Result<User, AppError> {
        tracing::debug!(sql = %self.sql.insert_user, email = %input.email, "query");
        let row = sqlx::query_as::<_, User>(&self.sql.insert_user)
            .bind(input.email)
            .bind(input.first_name)
            .bind(input.last_name)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create_post(&self, input: NewPost) -> Result<Post, AppError> {
        tracing::debug!(sql = %self.sql.insert_post, author_id = input.author_id, "query");
        let row = sqlx::query_as::<_, Post>(&self.sql.insert_post)
            .bind(input.title)
            .bind(input.content)
            .bind(input.published)
            .bind(input.author_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create_tag(&self, input: NewTag) -> Result<Tag, AppError> {
        tracing::debug!(sql = %self.sql.insert_tag, post_id = input.post_id, "query");
        let row = sqlx::query_as::<_, Tag>(&self.sql.insert_tag)
            .bind(input.title)
            .bind(input.post_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_post(&self, id: i32) -> Result<Post, AppError> {
        tracing::debug!(sql = %self.sql.delete_post, id, "query");
        sqlx::query_as::<_, Post>(&self.sql.delete_post)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post with ID {} not found.", id)))
    }

    async fn delete_posts_by_author(&self, author_id: i32) -> Result<u64, AppError> {
        tracing::debug!(sql = %self.sql.delete_posts_by_author, author_id, "query");
        let result = sqlx::query(&self.sql.delete_posts_by_author)
            .bind(author_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete_user(&self, id: i32) -> Result<User, AppError> {
        tracing::debug!(sql = %self.sql.delete_user, id, "query");
        sqlx::query_as::<_, User>(&self.sql.delete_user)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with ID {} not found.", id)))
    }
}
