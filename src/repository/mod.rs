//! Data access for users, posts and tags.
//!
//! [`PgRepository`] runs against PostgreSQL; [`MemoryRepository`] keeps rows in process and
//! enforces the same unique and foreign-key constraints, which is what the test suite uses.

mod memory;
mod postgres;

pub use memory::MemoryRepository;
pub use postgres::PgRepository;

use crate::error::AppError;
use crate::model::{NewPost, NewTag, NewUser, Post, Tag, User};
use async_trait::async_trait;

#[async_trait]
pub trait Repository: Send + Sync {
    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> Result<(), AppError>;

    async fn find_user(&self, id: i32) -> Result<Option<User>, AppError>;
    async fn find_post(&self, id: i32) -> Result<Option<Post>, AppError>;

    /// Posts authored by `author_id`, ordered by id.
    async fn posts_by_author(&self, author_id: i32) -> Result<Vec<Post>, AppError>;
    /// Tags attached to `post_id`, ordered by id.
    async fn tags_by_post(&self, post_id: i32) -> Result<Vec<Tag>, AppError>;

    async fn create_user(&self, input: NewUser) -> Result<User, AppError>;
    async fn create_post(&self, input: NewPost) -> Result<Post, AppError>;
    async fn create_tag(&self, input: NewTag) -> Result<Tag, AppError>;

    /// Delete one post and return it. Fails when the post has tags.
    async fn delete_post(&self, id: i32) -> Result<Post, AppError>;
    /// Delete every post by `author_id`; returns the number removed.
    async fn delete_posts_by_author(&self, author_id: i32) -> Result<u64, AppError>;
    /// Delete one user and return it. Fails when the user still has posts.
    async fn delete_user(&self, id: i32) -> Result<User, AppError>;
}
