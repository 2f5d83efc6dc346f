//! Keyword provider — the ranked keyword page the optimizer consumes.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::warn;

use crate::models::keyword::{KeywordRecord, KeywordRow};

/// Maximum number of keyword records per page.
pub const PAGE_SIZE: i64 = 10;

/// Supplies the ranked keyword page for one optimize run.
///
/// Held in `AppState` as `Arc<dyn KeywordProvider>` so the backing store can
/// be swapped without touching handler or engine code. An empty page is a
/// valid result, distinct from an error.
#[async_trait]
pub trait KeywordProvider: Send + Sync {
    async fn top_keywords(&self) -> anyhow::Result<Vec<KeywordRecord>>;
}

/// Postgres-backed provider over the `keywords` table.
pub struct PgKeywordProvider {
    pool: PgPool,
}

impl PgKeywordProvider {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeywordProvider for PgKeywordProvider {
    /// Top page by descending search volume, ties broken by ascending SEO
    /// difficulty. Rows failing boundary validation are skipped with a
    /// warning rather than failing the whole page.
    async fn top_keywords(&self) -> anyhow::Result<Vec<KeywordRecord>> {
        let rows = sqlx::query_as::<_, KeywordRow>(
            "SELECT * FROM keywords ORDER BY search_volume DESC, seo_difficulty ASC LIMIT $1",
        )
        .bind(PAGE_SIZE)
        .fetch_all(&self.pool)
        .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            match KeywordRecord::from_row(row) {
                Ok(record) => records.push(record),
                Err(reason) => warn!("Skipping invalid keyword row: {reason}"),
            }
        }
        Ok(records)
    }
}
