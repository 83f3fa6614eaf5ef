//! Shared application state for all routes.

use crate::graphql::{build_schema, BlogSchema};
use crate::repository::Repository;
use crate::service::BlogService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub service: BlogService,
    pub schema: BlogSchema,
}

impl AppState {
    pub fn new(repo: Arc<dyn Repository>, max_query_depth: Option<usize>) -> Self {
        let service = BlogService::new(repo);
        let schema = build_schema(service.clone(), max_query_depth);
        AppState { service, schema }
    }
}
