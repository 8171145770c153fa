//! PDF client: the single point of entry for the headless-browser PDF service.
//!
//! The service accepts fully-resolved HTML plus header/footer metadata and
//! returns the PDF bytes. Failures are classified so the UI can tell a
//! timeout from a browser that would not start.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF rendering timed out")]
    Timeout,

    #[error("PDF engine failed to launch: {0}")]
    LaunchFailed(String),

    #[error("PDF rendering failed: {0}")]
    Failed(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl PdfError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, PdfError::Timeout)
    }

    pub fn code(&self) -> &'static str {
        match self {
            PdfError::Timeout => "PDF_TIMEOUT",
            PdfError::LaunchFailed(_) => "PDF_ENGINE_UNAVAILABLE",
            PdfError::Failed(_) | PdfError::Http(_) => "PDF_FAILED",
        }
    }

    /// Message safe to show to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            PdfError::Timeout => {
                "PDF generation timed out. Try again, or shorten the document."
            }
            PdfError::LaunchFailed(_) => {
                "The PDF engine could not be started. Please try again in a few minutes."
            }
            PdfError::Failed(_) | PdfError::Http(_) => {
                "Something went wrong while generating the PDF. Please try again."
            }
        }
    }
}

/// Candidate details printed in the PDF header/footer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PdfMetadata {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PdfRequest {
    pub html: String,
    pub filename: String,
    pub metadata: PdfMetadata,
    pub font_size: String,
}

/// Swap point for the rendering backend. Carried in `AppState` as
/// `Arc<dyn PdfRenderer>`.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render(&self, request: &PdfRequest) -> Result<Bytes, PdfError>;
}

#[derive(Debug, Deserialize)]
struct ServiceError {
    error: ServiceErrorBody,
}

#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    message: String,
}

/// HTTP client for the PDF rendering service.
#[derive(Clone)]
pub struct HttpPdfRenderer {
    client: Client,
    endpoint: String,
}

impl HttpPdfRenderer {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, PdfError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoint,
        })
    }
}

#[async_trait]
impl PdfRenderer for HttpPdfRenderer {
    async fn render(&self, request: &PdfRequest) -> Result<Bytes, PdfError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("PDF service returned {}: {}", status, body);
            return Err(classify_failure(status, &body));
        }

        let bytes = response.bytes().await.map_err(transport_error)?;
        debug!(
            "PDF rendered: filename={}, bytes={}",
            request.filename,
            bytes.len()
        );
        Ok(bytes)
    }
}

fn transport_error(error: reqwest::Error) -> PdfError {
    if error.is_timeout() {
        PdfError::Timeout
    } else {
        PdfError::Http(error)
    }
}

/// Maps a failed service response to a [`PdfError`].
fn classify_failure(status: StatusCode, body: &str) -> PdfError {
    let message = serde_json::from_str::<ServiceError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string());
    let lower = message.to_lowercase();

    if status == StatusCode::GATEWAY_TIMEOUT
        || lower.contains("timeout")
        || lower.contains("timed out")
    {
        PdfError::Timeout
    } else if lower.contains("launch") {
        PdfError::LaunchFailed(message)
    } else if message.is_empty() {
        PdfError::Failed(format!("status {}", status.as_u16()))
    } else {
        PdfError::Failed(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_timeout_is_timeout() {
        assert!(classify_failure(StatusCode::GATEWAY_TIMEOUT, "").is_timeout());
    }

    #[test]
    fn test_timeout_message_is_timeout() {
        let body = r#"{"error":{"message":"Navigation Timeout Exceeded: 30000ms"}}"#;
        assert!(classify_failure(StatusCode::INTERNAL_SERVER_ERROR, body).is_timeout());
    }

    #[test]
    fn test_launch_failure_detected() {
        let err = classify_failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to launch the browser process!",
        );
        assert!(matches!(err, PdfError::LaunchFailed(_)));
        assert_eq!(err.code(), "PDF_ENGINE_UNAVAILABLE");
    }

    #[test]
    fn test_other_failure_is_generic() {
        let err = classify_failure(StatusCode::BAD_REQUEST, "");
        assert!(matches!(err, PdfError::Failed(ref m) if m == "status 400"));
    }

    #[test]
    fn test_user_messages_are_distinct() {
        let timeout = PdfError::Timeout.user_message();
        let launch = PdfError::LaunchFailed(String::new()).user_message();
        let generic = PdfError::Failed(String::new()).user_message();
        assert_ne!(timeout, launch);
        assert_ne!(launch, generic);
        assert_ne!(timeout, generic);
        assert!(timeout.contains("timed out"));
    }
}
