//! Document processing pipeline: text extraction from uploaded packages,
//! in-place binary rewriting of the document body, and export rendering.
//!
//! Everything here is synchronous and operates on in-memory buffers; the
//! documents involved are single legal documents of tens of KB, so no
//! streaming or background work is needed.

pub mod binary;
pub mod export;
pub mod extract;

/// Failures of the processing pipeline, each with a user-facing message.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("unsupported file: {0}")]
    InvalidInput(String),
    #[error("failed to extract text; ensure the file is a valid .docx document")]
    Extraction,
    #[error("invalid document package: no document body found")]
    PackageFormat,
    #[error("failed to render {0} output: {1}")]
    Render(&'static str, String),
}

/// Entity-encodes `&<>"'` so user values cannot break the body markup.
pub(crate) fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
