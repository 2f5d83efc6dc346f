use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a connection pool for the Postgres keyword store.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to the keyword store (PostgreSQL)...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("Keyword store connection pool established");
    Ok(pool)
}
