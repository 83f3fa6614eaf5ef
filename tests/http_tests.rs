use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use blog_graphql::error::AppError;
use blog_graphql::model::{NewPost, NewTag, NewUser, Post, Tag, User};
use blog_graphql::{app, AppState, MemoryRepository, Repository};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn router() -> axum::Router {
    app(AppState::new(Arc::new(MemoryRepository::new()), None))
}

async fn body_json(res: axum::response::Response) -> Value {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn graphql_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/graphql")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let res = router()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn version_reports_crate_name() {
    let res = router()
        .oneshot(Request::builder().uri("/version").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["name"], "blog-graphql");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["graphql"], "/graphql");
}

#[tokio::test]
async fn info_matches_version() {
    let app = router();
    let version = app
        .clone()
        .oneshot(Request::builder().uri("/version").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let info = app
        .oneshot(Request::builder().uri("/info").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(body_json(version).await, body_json(info).await);
}

#[tokio::test]
async fn ready_checks_the_repository() {
    let res = router()
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await, json!({ "status": "ok", "database": "ok" }));
}

/// Repository whose backing store is unreachable.
struct Unreachable;

#[async_trait]
impl Repository for Unreachable {
    async fn ping(&self) -> Result<(), AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }
    async fn find_user(&self, _: i32) -> Result<Option<User>, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }
    async fn find_post(&self, _: i32) -> Result<Option<Post>, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }
    async fn posts_by_author(&self, _: i32) -> Result<Vec<Post>, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }
    async fn tags_by_post(&self, _: i32) -> Result<Vec<Tag>, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }
    async fn create_user(&self, _: NewUser) -> Result<User, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }
    async fn create_post(&self, _: NewPost) -> Result<Post, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }
    async fn create_tag(&self, _: NewTag) -> Result<Tag, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }
    async fn delete_post(&self, _: i32) -> Result<Post, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }
    async fn delete_posts_by_author(&self, _: i32) -> Result<u64, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }
    async fn delete_user(&self, _: i32) -> Result<User, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }
}

#[tokio::test]
async fn ready_is_degraded_when_the_store_is_down() {
    let res = app(AppState::new(Arc::new(Unreachable), None))
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        body_json(res).await,
        json!({ "status": "degraded", "database": "unavailable" })
    );
}

#[tokio::test]
async fn database_errors_propagate_with_a_code() {
    let res = app(AppState::new(Arc::new(Unreachable), None))
        .oneshot(graphql_request(json!({ "query": "{ post(id: 1) { id } }" })))
        .await
        .unwrap();
    let body = body_json(res).await;
    assert_eq!(body["errors"][0]["extensions"]["code"], "DATABASE_ERROR");
    assert!(body["errors"][0]["message"]
        .as_str()
        .unwrap()
        .starts_with("database: "));
}

#[tokio::test]
async fn graphql_post_executes_operations() {
    let app = router();
    let res = app
        .clone()
        .oneshot(graphql_request(json!({
            "query": "mutation($email: String!) { createUser(email: $email) { id email } }",
            "variables": { "email": "http@example.com" }
        })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["data"]["createUser"]["email"], "http@example.com");
    let id = body["data"]["createUser"]["id"].as_i64().unwrap();

    let res = app
        .oneshot(graphql_request(json!({
            "query": "query($id: Int!) { user(id: $id) { email } }",
            "variables": { "id": id }
        })))
        .await
        .unwrap();
    let body = body_json(res).await;
    assert_eq!(body["data"]["user"]["email"], "http@example.com");
}

#[tokio::test]
async fn graphql_errors_carry_not_found_code() {
    let res = router()
        .oneshot(graphql_request(json!({ "query": "mutation { deleteUser(userId: 8) { id } }" })))
        .await
        .unwrap();
    let body = body_json(res).await;
    assert_eq!(body["errors"][0]["message"], "User with ID 8 not found.");
    assert_eq!(body["errors"][0]["extensions"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn graphiql_is_served_on_get() {
    let res = router()
        .oneshot(Request::builder().uri("/graphql").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("graphiql"));
}
