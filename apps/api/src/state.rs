use std::sync::Arc;

use crate::cms::CmsClient;
use crate::keywords::provider::KeywordProvider;
use crate::rewrite::engine::ContentRewriter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Ranked keyword source. Default: the Postgres store; swappable behind
    /// the trait without touching handlers.
    pub keywords: Arc<dyn KeywordProvider>,
    /// Rewrite pipeline with the strategy picked via REWRITE_STRATEGY at startup.
    pub rewriter: Arc<ContentRewriter>,
    pub cms: CmsClient,
}
