use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Panics at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub cms_endpoint: String,
    pub cms_api_token: String,
    pub port: u16,
    pub rust_log: String,
    /// Placement strategy name, resolved to a StrategyKind at startup.
    pub rewrite_strategy: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            cms_endpoint: require_env("CMS_ENDPOINT")?,
            cms_api_token: require_env("CMS_API_TOKEN")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            rewrite_strategy: std::env::var("REWRITE_STRATEGY")
                .unwrap_or_else(|_| "mark".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
