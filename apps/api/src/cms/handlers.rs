//! Axum route handlers for the CMS submission API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cms::CmsReceipt;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CmsSubmitRequest {
    #[serde(rename = "optimizedContent", default)]
    pub optimized_content: String,
}

#[derive(Debug, Serialize)]
pub struct CmsSubmitResponse {
    pub receipt: CmsReceipt,
}

/// POST /api/v1/cms/submit
///
/// Forwards optimized content to the configured CMS. The content is treated
/// as pre-formatted markup and sent verbatim.
pub async fn handle_cms_submit(
    State(state): State<AppState>,
    Json(request): Json<CmsSubmitRequest>,
) -> Result<Json<CmsSubmitResponse>, AppError> {
    if request.optimized_content.trim().is_empty() {
        return Err(AppError::MissingInput("no content provided".to_string()));
    }

    let receipt = state
        .cms
        .submit(&request.optimized_content)
        .await
        .map_err(|e| AppError::Cms(e.to_string()))?;

    info!("Submitted optimized content to CMS: id={:?}", receipt.id);

    Ok(Json(CmsSubmitResponse { receipt }))
}
