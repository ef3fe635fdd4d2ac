//! HTTP client for the de-raining inference API.
//!
//! Wraps the inference service's `POST /api/derain` endpoint using
//! [`reqwest`]. The call is bounded by a per-request timeout; expiry is
//! reported as [`InferenceError::Unreachable`]. No retries happen here --
//! retry policy belongs to the caller.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

/// Image references returned by a successful inference call.
///
/// The inference service returns both images as data URIs; this service
/// treats them as opaque strings.
#[derive(Debug, Clone, Deserialize)]
pub struct DerainOutput {
    pub original_image: String,
    pub derained_image: String,
}

/// Errors from the inference layer.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    /// The service could not be reached: connection failure or timeout.
    #[error("Inference service unreachable: {0}")]
    Unreachable(String),

    /// The service answered with a non-success status code. `detail`
    /// carries the upstream message when the body supplies one.
    #[error("Inference service rejected the request ({status}): {detail}")]
    Rejected { status: u16, detail: String },

    /// The response body could not be parsed into the expected shape.
    #[error("Malformed inference response: {0}")]
    Malformed(String),
}

/// The transformation capability the orchestrator depends on.
///
/// A trait seam so tests can substitute a stub without a live inference
/// backend.
#[async_trait]
pub trait Derain: Send + Sync {
    /// Submit an image for de-raining and await the result references.
    async fn transform(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        mime_type: &str,
    ) -> Result<DerainOutput, InferenceError>;
}

/// HTTP implementation of [`Derain`] targeting the FastAPI inference
/// service.
pub struct DerainClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl DerainClient {
    /// Create a client for the inference service at `base_url`
    /// (e.g. `http://localhost:8000`).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            timeout,
        }
    }

    /// Base HTTP URL of the inference service.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Derain for DerainClient {
    async fn transform(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        mime_type: &str,
    ) -> Result<DerainOutput, InferenceError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(mime_type)
            .map_err(|e| {
                InferenceError::Malformed(format!("invalid content type '{mime_type}': {e}"))
            })?;
        let form = reqwest::multipart::Form::new().part("file", part);

        tracing::debug!(filename, mime_type, "Submitting image to inference service");

        let response = self
            .client
            .post(format!("{}/api/derain", self.base_url))
            .multipart(form)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| InferenceError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(InferenceError::Rejected {
                status: status.as_u16(),
                detail: extract_detail(&body).unwrap_or(body),
            });
        }

        // The per-request timeout can also expire mid-body; that is still
        // an unreachable service, not a malformed response.
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                InferenceError::Unreachable(e.to_string())
            } else {
                InferenceError::Malformed(e.to_string())
            }
        })?;

        serde_json::from_str::<DerainOutput>(&body)
            .map_err(|e| InferenceError::Malformed(format!("{e} in response body")))
    }
}

/// Pull the human-readable message out of an error body.
///
/// FastAPI error responses look like `{"detail": "..."}`; fall back to the
/// raw body when that field is absent.
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .and_then(|d| d.as_str())
        .map(str::to_string)
}
