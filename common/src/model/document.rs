use crate::model::placeholder::PlaceholderDescriptor;
use serde::{Deserialize, Serialize};

/// Lifecycle of a persisted document record.
///
/// A record starts as `Draft` when the upload is saved, moves to `InProgress`
/// once the first fill values are stored, and to `Completed` when the filled
/// binary has been written. `Archived` is reserved for records the user keeps
/// but no longer works on. Deletion is a soft delete (a timestamp on the row),
/// never a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Draft,
    InProgress,
    Completed,
    Archived,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Draft => "draft",
            DocumentStatus::InProgress => "in_progress",
            DocumentStatus::Completed => "completed",
            DocumentStatus::Archived => "archived",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw {
            "in_progress" => DocumentStatus::InProgress,
            "completed" => DocumentStatus::Completed,
            "archived" => DocumentStatus::Archived,
            _ => DocumentStatus::Draft,
        }
    }
}

/// Row shown in the document history list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: String,
    pub title: String,
    pub file_name: String,
    pub status: DocumentStatus,
    pub total_placeholders: u32,
    pub filled_placeholders: u32,
    pub created_at: String,
    pub updated_at: String,
}

/// Full document record including the extracted text and its placeholders,
/// ordered by detection position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentDetail {
    pub summary: DocumentSummary,
    pub original_text: String,
    pub placeholders: Vec<PlaceholderDescriptor>,
}
