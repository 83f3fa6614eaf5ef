//! In-process repository with the same constraint behavior as the PostgreSQL tables.

use super::Repository;
use crate::error::AppError;
use crate::model::{NewPost, NewTag, NewUser, Post, Tag, User};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::RwLock;

#[derive(Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    posts: BTreeMap<i32, Post>,
    tags: BTreeMap<i32, Tag>,
    next_user_id: i32,
    next_post_id: i32,
    next_tag_id: i32,
}

/// Serial ids start at 1, like a fresh `SERIAL` column.
fn next_id(counter: &mut i32) -> i32 {
    *counter += 1;
    *counter
}

#[derive(Default)]
pub struct MemoryRepository {
    tables: RwLock<Tables>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Tables>, AppError> {
        self.tables
            .read()
            .map_err(|_| AppError::Internal("repository lock poisoned".into()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Tables>, AppError> {
        self.tables
            .write()
            .map_err(|_| AppError::Internal("repository lock poisoned".into()))
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }

    async fn find_user(&self, id: i32) -> Result<Option<User>, AppError> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    async fn find_post(&self, id: i32) -> Result<Option<Post>, AppError> {
        Ok(self.read()?.posts.get(&id).cloned())
    }

    async fn posts_by_author(&self, author_id: i32) -> Result<Vec<Post>, AppError> {
        Ok(self
            .read()?
            .posts
            .values()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn tags_by_post(&self, post_id: i32) -> Result<Vec<Tag>, AppError> {
        Ok(self
            .read()?
            .tags
            .values()
            .filter(|t| t.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn create_user(&self, input: NewUser) -> Result<User, AppError> {
        let mut t = self.write()?;
        if t.users.values().any(|u| u.email == input.email) {
            return Err(AppError::Conflict(format!(
                "email '{}' is already taken",
                input.email
            )));
        }
        let user = User {
            id: next_id(&mut t.next_user_id),
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
        };
        t.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn create_post(&self, input: NewPost) -> Result<Post, AppError> {
        let mut t = self.write()?;
        if !t.users.contains_key(&input.author_id) {
            return Err(AppError::Conflict(format!(
                "author {} does not exist",
                input.author_id
            )));
        }
        let post = Post {
            id: next_id(&mut t.next_post_id),
            title: input.title,
            content: input.content,
            published: input.published,
            author_id: input.author_id,
        };
        t.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn create_tag(&self, input: NewTag) -> Result<Tag, AppError> {
        let mut t = self.write()?;
        if !t.posts.contains_key(&input.post_id) {
            return Err(AppError::Conflict(format!(
                "post {} does not exist",
                input.post_id
            )));
        }
        let tag = Tag {
            id: next_id(&mut t.next_tag_id),
            title: input.title,
            post_id: input.post_id,
        };
        t.tags.insert(tag.id, tag.clone());
        Ok(tag)
    }

    async fn delete_post(&self, id: i32) -> Result<Post, AppError> {
        let mut t = self.write()?;
        if !t.posts.contains_key(&id) {
            return Err(AppError::NotFound(format!("Post with ID {} not found.", id)));
        }
        if t.tags.values().any(|tag| tag.post_id == id) {
            return Err(AppError::Conflict(format!("post {} is still referenced by tags", id)));
        }
        t.posts
            .remove(&id)
            .ok_or_else(|| AppError::NotFound(format!("Post with ID {} not found.", id)))
    }

    async fn delete_posts_by_author(&self, author_id: i32) -> Result<u64, AppError> {
        let mut t = self.write()?;
        let ids: Vec<i32> = t
            .posts
            .values()
            .filter(|p| p.author_id == author_id)
            .map(|p| p.id)
            .collect();
        // Statement-level check: nothing is removed if any target post has tags.
        if let Some(id) = ids
            .iter()
            .find(|id| t.tags.values().any(|tag| tag.post_id == **id))
        {
            return Err(AppError::Conflict(format!("post {} is still referenced by tags", id)));
        }
        for id in &ids {
            t.posts.remove(id);
        }
        Ok(ids.len() as u64)
    }

    async fn delete_user(&self, id: i32) -> Result<User, AppError> {
        let mut t = self.write()?;
        if t.posts.values().any(|p| p.author_id == id) {
            return Err(AppError::Conflict(format!("user {} is still referenced by posts", id)));
        }
        t.users
            .remove(&id)
            .ok_or_else(|| AppError::NotFound(format!("User with ID {} not found.", id)))
    }
}
