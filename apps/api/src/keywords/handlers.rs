//! Axum route handlers for the Keyword API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::keyword::KeywordRecord;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct KeywordListResponse {
    pub keywords: Vec<KeywordRecord>,
}

/// GET /api/v1/keywords
///
/// Returns the ranked keyword page exactly as the optimizer would see it.
/// Unlike the optimize path, a provider fault here surfaces as an error so
/// operators can tell the store is down.
pub async fn handle_list_keywords(
    State(state): State<AppState>,
) -> Result<Json<KeywordListResponse>, AppError> {
    let keywords = state
        .keywords
        .top_keywords()
        .await
        .map_err(AppError::Internal)?;

    Ok(Json(KeywordListResponse { keywords }))
}
