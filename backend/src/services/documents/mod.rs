//! # Document Service Module
//!
//! Aggregates the API endpoints for the document lifecycle: upload and
//! detection, history listing, retrieval, fill-value persistence, and soft
//! deletion. Routes under `/api/documents` are directed to the handler logic
//! in the sub-modules.
//!
//! ## Registered Routes:
//!
//! *   **`POST /upload`** — `upload::process`: accepts a multipart `.docx`,
//!     extracts its text, asks the detection service for placeholders, and
//!     best-effort persists the document, its placeholder rows, and the
//!     original binary. Responds with the extracted text and descriptors
//!     either way; `saved = false` signals local-only mode.
//! *   **`GET /`** — `list::process`: non-deleted document summaries,
//!     newest first.
//! *   **`GET /{document_id}`** — `get::process`: one document with its
//!     placeholders in detection order.
//! *   **`POST /{document_id}/placeholders`** — `save_values::process`:
//!     persists fill values and refreshes the progress counters.
//! *   **`DELETE /{document_id}`** — `delete::process`: soft delete plus
//!     best-effort removal of the stored binaries.

mod delete;
mod get;
mod list;
mod save_values;
mod upload;

use actix_web::web::{delete, get, post, scope};
use actix_web::Scope;

/// The base path for all document-related API endpoints.
const API_PATH: &str = "/api/documents";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/upload", post().to(upload::process))
        .route("", get().to(list::process))
        .route("/{document_id}", get().to(get::process))
        .route("/{document_id}/placeholders", post().to(save_values::process))
        .route("/{document_id}", delete().to(delete::process))
}
