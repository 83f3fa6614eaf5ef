//! One delegated repository call per GraphQL operation.

use crate::error::AppError;
use crate::model::{NewPost, NewTag, NewUser, Post, Tag, User};
use crate::repository::Repository;
use std::sync::Arc;

#[derive(Clone)]
pub struct BlogService {
    repo: Arc<dyn Repository>,
}

impl BlogService {
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        BlogService { repo }
    }

    /// Readiness check against the backing store.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.repo.ping().await
    }

    /// Fetch a user by primary key.
    pub async fn user(&self, id: i32) -> Result<Option<User>, AppError> {
        self.repo.find_user(id).await
    }

    /// Posts of an existing user. A missing user has no post list at all.
    pub async fn user_posts(&self, user_id: i32) -> Result<Vec<Post>, AppError> {
        if self.repo.find_user(user_id).await?.is_none() {
            return Err(AppError::NotFound(format!("User with ID {} not found.", user_id)));
        }
        self.repo.posts_by_author(user_id).await
    }

    pub async fn posts_by_author(&self, author_id: i32) -> Result<Vec<Post>, AppError> {
        self.repo.posts_by_author(author_id).await
    }

    /// Fetch a post with its tags loaded in the same call.
    pub async fn post_with_tags(&self, id: i32) -> Result<Option<(Post, Vec<Tag>)>, AppError> {
        match self.repo.find_post(id).await? {
            Some(post) => {
                let tags = self.repo.tags_by_post(post.id).await?;
                Ok(Some((post, tags)))
            }
            None => Ok(None),
        }
    }

    pub async fn post(&self, id: i32) -> Result<Option<Post>, AppError> {
        self.repo.find_post(id).await
    }

    pub async fn tags_by_post(&self, post_id: i32) -> Result<Vec<Tag>, AppError> {
        self.repo.tags_by_post(post_id).await
    }

    pub async fn create_user(&self, input: NewUser) -> Result<User, AppError> {
        self.repo.create_user(input).await
    }

    pub async fn create_post(&self, input: NewPost) -> Result<Post, AppError> {
        self.repo.create_post(input).await
    }

    pub async fn create_tag(&self, input: NewTag) -> Result<Tag, AppError> {
        self.repo.create_tag(input).await
    }

    pub async fn delete_post(&self, post_id: i32) -> Result<Post, AppError> {
        self.repo.delete_post(post_id).await
    }

    /// Remove the user's posts, then the user. Returns the user as it was before deletion.
    pub async fn delete_user(&self, user_id: i32) -> Result<User, AppError> {
        let user = self
            .repo
            .find_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with ID {} not found.", user_id)))?;

        let removed = self.repo.delete_posts_by_author(user_id).await?;
        self.repo.delete_user(user_id).await?;
        tracing::info!(user_id, posts_removed = removed, "user deleted");
        Ok(user)
    }
}
