use crate::error::AppError;
use crate::model;
use crate::service::BlogService;
use async_graphql::{ComplexObject, Context, ErrorExtensions, ResultExt, SimpleObject};

#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<model::User> for User {
    fn from(u: model::User) -> Self {
        User {
            id: u.id,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
        }
    }
}

#[ComplexObject]
impl User {
    /// Posts written by this user
    async fn posts(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Post>> {
        let service = ctx.data::<BlogService>()?;
        let posts = service.posts_by_author(self.id).await.extend()?;
        Ok(posts.into_iter().map(Post::from).collect())
    }
}

#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: Option<String>,
    pub published: bool,
    #[graphql(skip)]
    pub author_id: i32,
    /// Set when the post was fetched together with its tags.
    #[graphql(skip)]
    pub loaded_tags: Option<Vec<Tag>>,
}

impl From<model::Post> for Post {
    fn from(p: model::Post) -> Self {
        Post {
            id: p.id,
            title: p.title,
            content: p.content,
            published: p.published,
            author_id: p.author_id,
            loaded_tags: None,
        }
    }
}

impl Post {
    pub fn with_tags(post: model::Post, tags: Vec<model::Tag>) -> Self {
        Post {
            loaded_tags: Some(tags.into_iter().map(Tag::from).collect()),
            ..Post::from(post)
        }
    }
}

#[ComplexObject]
impl Post {
    /// The user who wrote this post
    async fn author(&self, ctx: &Context<'_>) -> async_graphql::Result<User> {
        let service = ctx.data::<BlogService>()?;
        let user = service
            .user(self.author_id)
            .await
            .extend()?
            .ok_or_else(|| {
                AppError::NotFound(format!("User with ID {} not found.", self.author_id)).extend()
            })?;
        Ok(user.into())
    }

    /// Tags attached to this post
    async fn tags(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Tag>> {
        if let Some(tags) = &self.loaded_tags {
            return Ok(tags.clone());
        }
        let service = ctx.data::<BlogService>()?;
        let tags = service.tags_by_post(self.id).await.extend()?;
        Ok(tags.into_iter().map(Tag::from).collect())
    }
}

#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex)]
pub struct Tag {
    pub id: i32,
    pub title: String,
    #[graphql(skip)]
    pub post_id: i32,
}

impl From<model::Tag> for Tag {
    fn from(t: model::Tag) -> Self {
        Tag {
            id: t.id,
            title: t.title,
            post_id: t.post_id,
        }
    }
}

#[ComplexObject]
impl Tag {
    /// The post this tag belongs to
    async fn post(&self, ctx: &Context<'_>) -> async_graphql::Result<Post> {
        let service = ctx.data::<BlogService>()?;
        let post = service
            .post(self.post_id)
            .await
            .extend()?
            .ok_or_else(|| {
                AppError::NotFound(format!("Post with ID {} not found.", self.post_id)).extend()
            })?;
        Ok(post.into())
    }
}
