mod cms;
mod config;
mod db;
mod errors;
mod keywords;
mod models;
mod rewrite;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cms::CmsClient;
use crate::config::Config;
use crate::db::create_pool;
use crate::keywords::provider::{KeywordProvider, PgKeywordProvider};
use crate::rewrite::engine::{ContentRewriter, RewriteStrategy, StrategyKind};
use crate::rewrite::highlighter::PhraseHighlighter;
use crate::rewrite::placer::MarkInserter;
use crate::rewrite::segmenter::RuleSegmenter;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (panics on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Copylift API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the keyword store and its provider
    let pool = create_pool(&config.database_url).await?;
    let keywords: Arc<dyn KeywordProvider> = Arc::new(PgKeywordProvider::new(pool));

    // Rewrite pipeline: rule-based segmenter + configured placement strategy
    let strategy: Arc<dyn RewriteStrategy> = match StrategyKind::parse(&config.rewrite_strategy)? {
        StrategyKind::Mark => Arc::new(MarkInserter),
        StrategyKind::Phrase => Arc::new(PhraseHighlighter),
    };
    info!("Rewrite strategy: {}", strategy.name());
    let rewriter = Arc::new(ContentRewriter::new(Arc::new(RuleSegmenter), strategy));

    // CMS client for optimized-content forwarding
    let cms = CmsClient::new(config.cms_endpoint.clone(), config.cms_api_token.clone());
    info!("CMS client initialized");

    // Build app state
    let state = AppState {
        keywords,
        rewriter,
        cms,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
