use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `keywords` table — the ranked keyword store populated by
/// an external ranking job.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct KeywordRow {
    pub id: Uuid,
    pub keyword: String,
    pub search_volume: i64,
    pub seo_difficulty: f64,
    pub created_at: DateTime<Utc>,
}

/// A validated keyword record as consumed by the rewrite engine.
///
/// Read-only to the core: the engine never mutates or reorders the list it
/// is handed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordRecord {
    pub keyword: String,
    pub search_volume: i64,
    pub seo_difficulty: f64,
}

impl KeywordRecord {
    /// Validates a stored row into a record the engine can trust.
    ///
    /// The store is not assumed clean: blank keywords and negative search
    /// volumes are rejected here rather than propagated into placement.
    pub fn from_row(row: KeywordRow) -> Result<Self, String> {
        let keyword = row.keyword.trim().to_string();
        if keyword.is_empty() {
            return Err(format!("keyword row {} has an empty keyword string", row.id));
        }
        if row.search_volume < 0 {
            return Err(format!(
                "keyword '{keyword}' has negative search volume {}",
                row.search_volume
            ));
        }
        Ok(KeywordRecord {
            keyword,
            search_volume: row.search_volume,
            seo_difficulty: row.seo_difficulty,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_row(keyword: &str, search_volume: i64) -> KeywordRow {
        KeywordRow {
            id: Uuid::new_v4(),
            keyword: keyword.to_string(),
            search_volume,
            seo_difficulty: 42.0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_valid_row_converts() {
        let record = KeywordRecord::from_row(make_row("degree apprenticeships", 880)).unwrap();
        assert_eq!(record.keyword, "degree apprenticeships");
        assert_eq!(record.search_volume, 880);
    }

    #[test]
    fn test_keyword_is_trimmed_at_the_boundary() {
        let record = KeywordRecord::from_row(make_row("  careers  ", 10)).unwrap();
        assert_eq!(record.keyword, "careers");
    }

    #[test]
    fn test_blank_keyword_rejected() {
        assert!(KeywordRecord::from_row(make_row("   ", 10)).is_err());
        assert!(KeywordRecord::from_row(make_row("", 10)).is_err());
    }

    #[test]
    fn test_negative_search_volume_rejected() {
        let err = KeywordRecord::from_row(make_row("careers", -1)).unwrap_err();
        assert!(err.contains("negative search volume"));
    }
}
