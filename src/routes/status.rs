//! Liveness, readiness and build info for the GraphQL service.

use super::graphql::GRAPHQL_PATH;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

#[derive(Serialize)]
struct Status {
    status: &'static str,
}

#[derive(Serialize)]
struct StoreStatus {
    status: &'static str,
    database: &'static str,
}

/// Whether the repository answered a ping.
enum Readiness {
    Ready,
    StoreDown,
}

impl IntoResponse for Readiness {
    fn into_response(self) -> Response {
        let (code, body) = match self {
            Readiness::Ready => (StatusCode::OK, StoreStatus { status: "ok", database: "ok" }),
            Readiness::StoreDown => (
                StatusCode::SERVICE_UNAVAILABLE,
                StoreStatus { status: "degraded", database: "unavailable" },
            ),
        };
        (code, Json(body)).into_response()
    }
}

#[derive(Serialize)]
struct BuildInfo {
    name: &'static str,
    version: &'static str,
    graphql: &'static str,
}

async fn health() -> Json<Status> {
    Json(Status { status: "ok" })
}

async fn ready(State(state): State<AppState>) -> Readiness {
    match state.service.ping().await {
        Ok(()) => Readiness::Ready,
        Err(e) => {
            tracing::warn!(error = %e, code = e.code(), "repository ping failed");
            Readiness::StoreDown
        }
    }
}

async fn build_info() -> Json<BuildInfo> {
    Json(BuildInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        graphql: GRAPHQL_PATH,
    })
}

/// GET /health, /ready, and build info on /version and /info.
pub fn status_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(build_info))
        .route("/info", get(build_info))
        .with_state(state)
}
