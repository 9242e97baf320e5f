//! Placeholder detection capability.
//!
//! The upload flow depends on this trait rather than on a concrete client so
//! the substitution and validation logic can be exercised in tests without a
//! network, and so the provider can be swapped without touching the pipeline.

mod gemini;

pub use gemini::GeminiDetector;

use async_trait::async_trait;
use common::model::placeholder::PlaceholderDescriptor;

/// Scans extracted document text and returns the blank fields found in it,
/// in document order.
#[async_trait]
pub trait PlaceholderDetector: Send + Sync {
    async fn detect(&self, document_text: &str)
        -> Result<Vec<PlaceholderDescriptor>, DetectionError>;
}

/// Detection failures, each carrying a distinguishable user-facing message.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("placeholder detection is not configured: {0}")]
    NotConfigured(String),
    #[error("placeholder detection request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("detection quota exceeded; wait a moment and try again")]
    Quota,
    #[error("detection service returned status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("detection service did not return valid JSON: {0}")]
    Malformed(String),
}
