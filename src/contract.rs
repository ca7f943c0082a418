//! # contract: transport seam for template imports
//!
//! [`Uploader`] delivers one already-serialized batch to the import endpoint and
//! hands back the raw status and body. Deciding what counts as success, and what
//! to do next, is left to the caller ([`crate::synchronise`]).
//!
//! The trait is annotated for `mockall`, so tests can script responses per batch
//! without a network.

use async_trait::async_trait;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

/// Error type for transport failures (connection refused, TLS, body read, ...).
pub type UploadError = Box<dyn std::error::Error + Send + Sync>;

/// Status and body of an import response. The body is never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportResponse {
    pub status: u16,
    pub body: String,
}

impl ImportResponse {
    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends template batches to the import API.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Uploader: Send + Sync {
    /// POST one JSON array of templates. Returns `Err` only when no HTTP response
    /// was received; non-2xx responses are `Ok`.
    async fn import_batch(&self, body: String) -> Result<ImportResponse, UploadError>;
}
