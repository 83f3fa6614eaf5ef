//! HTTP surface: GraphQL plus health/readiness/version, wrapped in body-limit and trace layers.

mod graphql;
mod status;

pub use graphql::{graphql_routes, GRAPHQL_PATH};
pub use status::status_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(graphql_routes(state.schema.clone()))
        .merge(status_routes(state))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
}
