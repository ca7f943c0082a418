//! # Import client
//!
//! [`ImportClient`] is the networked [`Uploader`]: a reqwest client bound to one
//! endpoint and API key. Each call is a single POST with no retry.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use crate::contract::{ImportResponse, UploadError, Uploader};

/// Header carrying the API credential.
pub const API_KEY_HEADER: &str = "X-API-KEY";

pub struct ImportClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl ImportClient {
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        let api_key = api_key.into();
        tracing::info!(
            endpoint = %endpoint,
            api_key_set = !api_key.is_empty(),
            "Initialized ImportClient"
        );
        ImportClient {
            client: reqwest::Client::new(),
            endpoint,
            api_key,
        }
    }
}

#[async_trait]
impl Uploader for ImportClient {
    async fn import_batch(&self, body: String) -> Result<ImportResponse, UploadError> {
        tracing::debug!(endpoint = %self.endpoint, bytes = body.len(), "Posting template batch");

        let result = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .body(body)
            .send()
            .await;

        let response = match result {
            Ok(resp) => resp,
            Err(e) => {
                tracing::error!(error = ?e, endpoint = %self.endpoint, "Transport error posting batch");
                return Err(Box::new(e));
            }
        };

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            tracing::error!(error = ?e, status, "Failed to read response body");
            Box::new(e) as UploadError
        })?;

        tracing::debug!(status, body_len = body.len(), "Received import response");
        Ok(ImportResponse { status, body })
    }
}
