//! GraphQL schema and resolvers for users, posts and tags.
//!
//! ## Schema
//!
//! - **Queries**: `user`, `posts`, `post`
//! - **Mutations**: `createUser`, `createPost`, `createTag`, `deletePost`, `deleteUser`
//! - **Relations**: `User.posts`, `Post.author`, `Post.tags`, `Tag.post`
//!
//! Resolvers fetch [`BlogService`](crate::service::BlogService) from the schema data and make
//! one call each. Errors carry an `extensions.code` (see [`AppError::code`](crate::AppError::code)).

mod schema;
mod types;

pub use schema::{build_schema, BlogSchema, MutationRoot, QueryRoot};
pub use types::*;
