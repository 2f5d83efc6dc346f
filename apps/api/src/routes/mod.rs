pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::cms::handlers as cms_handlers;
use crate::keywords::handlers as keyword_handlers;
use crate::rewrite::handlers as rewrite_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Optimize API
        .route("/api/v1/optimize", post(rewrite_handlers::handle_optimize))
        // Keyword API
        .route(
            "/api/v1/keywords",
            get(keyword_handlers::handle_list_keywords),
        )
        // CMS forwarding
        .route("/api/v1/cms/submit", post(cms_handlers::handle_cms_submit))
        .with_state(state)
}
