//! Persisted records and insert payloads.

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: Option<String>,
    pub published: bool,
    pub author_id: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Tag {
    pub id: i32,
    pub title: String,
    pub post_id: i32,
}

#[derive(Clone, Debug, Default)]
pub struct NewUser {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Clone, Debug)]
pub struct NewPost {
    pub title: String,
    pub content: Option<String>,
    pub published: bool,
    pub author_id: i32,
}

#[derive(Clone, Debug)]
pub struct NewTag {
    pub title: String,
    pub post_id: i32,
}
