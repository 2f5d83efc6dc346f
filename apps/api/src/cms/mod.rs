/// CMS Client — the single point of entry for pushing optimized content to
/// the downstream CMS.
///
/// ARCHITECTURAL RULE: no other module may talk to the CMS directly. All
/// submissions go through this client, which wraps the CMS content API with
/// bearer auth and bounded retry.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod handlers;

const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum CmsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CMS error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("CMS unavailable after {retries} retries")]
    Unavailable { retries: u32 },
}

#[derive(Debug, Serialize)]
struct CmsSubmission<'a> {
    content: &'a str,
}

/// Receipt returned by the CMS for an accepted submission. Fields are
/// optional because CMS deployments differ in what they echo back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CmsReceipt {
    pub id: Option<String>,
    pub status: Option<String>,
}

/// The single CMS client used by the submission endpoint.
#[derive(Clone)]
pub struct CmsClient {
    client: Client,
    endpoint: String,
    api_token: String,
}

impl CmsClient {
    pub fn new(endpoint: String, api_token: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            endpoint,
            api_token,
        }
    }

    /// Submits optimized content to the CMS. Retries on 429 and 5xx with
    /// exponential backoff; other non-success statuses fail immediately.
    pub async fn submit(&self, content: &str) -> Result<CmsReceipt, CmsError> {
        let body = CmsSubmission { content };
        let mut last_error: Option<CmsError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "CMS submit attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_token)
                .json(&body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(CmsError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let message = response.text().await.unwrap_or_default();
                warn!("CMS returned {}: {}", status, message);
                last_error = Some(CmsError::Api {
                    status: status.as_u16(),
                    message,
                });
                continue;
            }

            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(CmsError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let receipt: CmsReceipt = response.json().await?;
            debug!("CMS accepted submission: id={:?}", receipt.id);
            return Ok(receipt);
        }

        Err(last_error.unwrap_or(CmsError::Unavailable {
            retries: MAX_RETRIES,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_tolerates_missing_fields() {
        let receipt: CmsReceipt = serde_json::from_str("{}").unwrap();
        assert!(receipt.id.is_none());
        assert!(receipt.status.is_none());
    }

    #[test]
    fn test_receipt_parses_full_payload() {
        let receipt: CmsReceipt =
            serde_json::from_str(r#"{"id": "entry-42", "status": "published"}"#).unwrap();
        assert_eq!(receipt.id.as_deref(), Some("entry-42"));
        assert_eq!(receipt.status.as_deref(), Some("published"));
    }

    #[test]
    fn test_submission_payload_shape() {
        let json = serde_json::to_value(CmsSubmission { content: "copy" }).unwrap();
        assert_eq!(json, serde_json::json!({ "content": "copy" }));
    }
}
