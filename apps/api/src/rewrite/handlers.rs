//! Axum route handlers for the Optimize API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::keyword::KeywordRecord;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OptimizeRequest {
    #[serde(default)]
    pub text: String,
}

/// Field names match the wire contract the editor frontend consumes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResponse {
    pub optimized_text: String,
    pub highlighted_keywords: Vec<String>,
    pub unused_keywords: Vec<String>,
}

/// POST /api/v1/optimize
///
/// Validates the payload, fetches the ranked keyword page, and runs the
/// rewrite pipeline. A provider fault degrades to an empty page rather than
/// propagating; an empty page is a retryable availability error.
pub async fn handle_optimize(
    State(state): State<AppState>,
    Json(request): Json<OptimizeRequest>,
) -> Result<Json<OptimizeResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::MissingInput("no content provided".to_string()));
    }

    let keywords: Vec<KeywordRecord> = match state.keywords.top_keywords().await {
        Ok(records) => records,
        Err(e) => {
            error!("Keyword provider unavailable: {e:#}");
            Vec::new()
        }
    };

    if keywords.is_empty() {
        return Err(AppError::NoKeywordsAvailable);
    }

    let outcome = state.rewriter.optimize(&request.text, &keywords);

    info!(
        "Optimized content: {} keywords placed, {} unused",
        outcome.used_keywords.len(),
        outcome.unused_keywords.len()
    );

    Ok(Json(OptimizeResponse {
        optimized_text: outcome.optimized_text,
        highlighted_keywords: outcome.used_keywords,
        unused_keywords: outcome.unused_keywords,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::cms::CmsClient;
    use crate::keywords::provider::KeywordProvider;
    use crate::rewrite::engine::ContentRewriter;
    use crate::rewrite::placer::MarkInserter;
    use crate::rewrite::segmenter::RuleSegmenter;

    /// Provider stub: either a fixed page or a simulated outage.
    struct StubProvider {
        records: Option<Vec<KeywordRecord>>,
    }

    #[async_trait]
    impl KeywordProvider for StubProvider {
        async fn top_keywords(&self) -> anyhow::Result<Vec<KeywordRecord>> {
            match &self.records {
                Some(records) => Ok(records.clone()),
                None => Err(anyhow::anyhow!("store down")),
            }
        }
    }

    fn make_state(records: Option<Vec<KeywordRecord>>) -> AppState {
        AppState {
            keywords: Arc::new(StubProvider { records }),
            rewriter: Arc::new(ContentRewriter::new(
                Arc::new(RuleSegmenter),
                Arc::new(MarkInserter),
            )),
            cms: CmsClient::new(
                "http://localhost:9/unreachable".to_string(),
                "test-token".to_string(),
            ),
        }
    }

    fn kw(keyword: &str) -> KeywordRecord {
        KeywordRecord {
            keyword: keyword.to_string(),
            search_volume: 100,
            seo_difficulty: 50.0,
        }
    }

    #[tokio::test]
    async fn test_empty_text_is_rejected() {
        let state = make_state(Some(vec![kw("careers")]));
        let result = handle_optimize(
            State(state),
            Json(OptimizeRequest {
                text: "   ".to_string(),
            }),
        )
        .await;

        assert!(matches!(result, Err(AppError::MissingInput(_))));
    }

    #[tokio::test]
    async fn test_empty_keyword_page_is_no_keywords_available() {
        let state = make_state(Some(vec![]));
        let result = handle_optimize(
            State(state),
            Json(OptimizeRequest {
                text: "A perfectly fine sentence with enough words.".to_string(),
            }),
        )
        .await;

        assert!(matches!(result, Err(AppError::NoKeywordsAvailable)));
    }

    #[tokio::test]
    async fn test_provider_outage_degrades_to_no_keywords_available() {
        let state = make_state(None);
        let result = handle_optimize(
            State(state),
            Json(OptimizeRequest {
                text: "A perfectly fine sentence with enough words.".to_string(),
            }),
        )
        .await;

        // The raw provider fault is logged and swallowed, never surfaced.
        assert!(matches!(result, Err(AppError::NoKeywordsAvailable)));
    }

    #[tokio::test]
    async fn test_successful_optimize_partitions_keywords() {
        let state = make_state(Some(vec![kw("apprenticeships"), kw("zzz-unplaceable")]));
        let response = handle_optimize(
            State(state),
            Json(OptimizeRequest {
                text: "This is a fairly long sentence about study options.".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.0.highlighted_keywords, vec!["apprenticeships"]);
        assert_eq!(response.0.unused_keywords, vec!["zzz-unplaceable"]);
        assert!(response
            .0
            .optimized_text
            .contains("<mark>apprenticeships</mark>"));
    }

    #[test]
    fn test_request_text_defaults_to_empty_when_absent() {
        let request: OptimizeRequest = serde_json::from_str("{}").unwrap();
        assert!(request.text.is_empty());
    }

    #[test]
    fn test_response_uses_camel_case_wire_names() {
        let response = OptimizeResponse {
            optimized_text: "t".to_string(),
            highlighted_keywords: vec![],
            unused_keywords: vec![],
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("optimizedText").is_some());
        assert!(json.get("highlightedKeywords").is_some());
        assert!(json.get("unusedKeywords").is_some());
    }
}
