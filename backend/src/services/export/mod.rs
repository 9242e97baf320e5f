//! # Export Service Module
//!
//! Endpoints that turn a filled session into a downloadable file. Validation
//! runs first in both handlers; a non-empty error list blocks the export with
//! a `422` and nothing is rendered.
//!
//! ## Registered Routes:
//!
//! *   **`POST /`** — `render::process`: JSON body with the extracted text,
//!     descriptors, target format (`docx`/`pdf`/`html`), and filename.
//!     Substitutes values into the text and returns the rendered file.
//! *   **`POST /binary`** — `binary::process`: multipart body with the
//!     original `.docx` and the descriptors. Rewrites the package body in
//!     place so the source formatting survives, best-effort stores the filled
//!     copy when a `document_id` is supplied, and returns the new binary.

mod binary;
mod render;

use actix_web::web::{post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/export";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", post().to(render::process))
        .route("/binary", post().to(binary::process))
}
