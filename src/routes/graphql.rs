//! GraphQL endpoint: POST executes, GET serves GraphiQL.

use crate::graphql::BlogSchema;
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::GraphQL;
use axum::{response::Html, routing::get, Router};

pub const GRAPHQL_PATH: &str = "/graphql";

async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

pub fn graphql_routes(schema: BlogSchema) -> Router {
    Router::new().route(GRAPHQL_PATH, get(graphiql).post_service(GraphQL::new(schema)))
}
