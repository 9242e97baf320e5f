use crate::model::placeholder::PlaceholderDescriptor;
use serde::{Deserialize, Serialize};

/// Response payload for a processed upload: the extracted text, the detected
/// placeholder descriptors, and whether the backend managed to persist the
/// document (`saved = false` means the session continues local-only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub document_id: String,
    pub file_name: String,
    pub content: String,
    pub placeholders: Vec<PlaceholderDescriptor>,
    pub saved: bool,
}

/// One placeholder value to persist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceholderValue {
    pub id: String,
    pub value: String,
}

/// Request payload for `POST /api/documents/{id}/placeholders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveValuesRequest {
    pub values: Vec<PlaceholderValue>,
}

/// Request payload for the text export endpoint. `format` is one of
/// `docx`, `pdf`, `html`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    pub file_name: String,
    pub format: String,
    pub content: String,
    pub placeholders: Vec<PlaceholderDescriptor>,
}

/// 422 body returned when validation blocks an export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub errors: Vec<String>,
}
