use async_graphql::{Context, EmptySubscription, ErrorExtensions, Object, ResultExt, Schema};

use crate::error::AppError;
use crate::model::{NewPost, NewTag, NewUser};
use crate::service::BlogService;

use super::types::*;

pub type BlogSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(service: BlogService, max_depth: Option<usize>) -> BlogSchema {
    let builder = Schema::build(QueryRoot, MutationRoot, EmptySubscription).data(service);
    match max_depth {
        Some(depth) => builder.limit_depth(depth).finish(),
        None => builder.finish(),
    }
}

fn service<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a BlogService> {
    ctx.data::<BlogService>()
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Get a single user by ID
    async fn user(&self, ctx: &Context<'_>, id: i32) -> async_graphql::Result<User> {
        let user = service(ctx)?
            .user(id)
            .await
            .extend()?
            .ok_or_else(|| AppError::NotFound(format!("User with ID {} not found.", id)).extend())?;
        Ok(user.into())
    }

    /// Get the posts written by a user
    async fn posts(&self, ctx: &Context<'_>, user_id: i32) -> async_graphql::Result<Vec<Post>> {
        let posts = service(ctx)?.user_posts(user_id).await.extend()?;
        Ok(posts.into_iter().map(Post::from).collect())
    }

    /// Get a single post by ID, with its tags
    async fn post(&self, ctx: &Context<'_>, id: i32) -> async_graphql::Result<Option<Post>> {
        let found = service(ctx)?.post_with_tags(id).await.extend()?;
        Ok(found.map(|(post, tags)| Post::with_tags(post, tags)))
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create a new user
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        email: String,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> async_graphql::Result<User> {
        let user = service(ctx)?
            .create_user(NewUser {
                email,
                first_name,
                last_name,
            })
            .await
            .extend()?;
        Ok(user.into())
    }

    /// Create a post owned by an existing user
    async fn create_post(
        &self,
        ctx: &Context<'_>,
        title: String,
        content: Option<String>,
        published: bool,
        author_id: i32,
    ) -> async_graphql::Result<Post> {
        let post = service(ctx)?
            .create_post(NewPost {
                title,
                content,
                published,
                author_id,
            })
            .await
            .extend()?;
        Ok(post.into())
    }

    /// Attach a tag to an existing post
    async fn create_tag(
        &self,
        ctx: &Context<'_>,
        title: String,
        post_id: i32,
    ) -> async_graphql::Result<Tag> {
        let tag = service(ctx)?
            .create_tag(NewTag { title, post_id })
            .await
            .extend()?;
        Ok(tag.into())
    }

    /// Delete a post and return it
    async fn delete_post(&self, ctx: &Context<'_>, post_id: i32) -> async_graphql::Result<Post> {
        let post = service(ctx)?.delete_post(post_id).await.extend()?;
        Ok(post.into())
    }

    /// Delete a user and all of their posts
    async fn delete_user(&self, ctx: &Context<'_>, user_id: i32) -> async_graphql::Result<User> {
        let user = service(ctx)?.delete_user(user_id).await.extend()?;
        Ok(user.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryRepository;
    use std::sync::Arc;

    fn schema() -> BlogSchema {
        build_schema(BlogService::new(Arc::new(MemoryRepository::new())), None)
    }

    #[test]
    fn sdl_exposes_camel_case_operations() {
        let sdl = schema().sdl();
        assert!(sdl.contains("user(id: Int!): User!"));
        assert!(sdl.contains("posts(userId: Int!): [Post!]!"));
        assert!(sdl.contains("post(id: Int!): Post"));
        assert!(sdl.contains("deleteUser(userId: Int!): User!"));
        assert!(sdl.contains("firstName: String"));
    }

    #[tokio::test]
    async fn depth_limit_rejects_deep_queries() {
        let schema = build_schema(BlogService::new(Arc::new(MemoryRepository::new())), Some(2));
        let res = schema
            .execute("{ post(id: 1) { author { posts { id } } } }")
            .await;
        assert!(!res.errors.is_empty());
    }
}
