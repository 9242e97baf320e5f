use crate::context::AppContext;
use crate::storage::{self, blobs};
use actix_web::{web, HttpResponse, Responder};

/// Handler for `DELETE /api/documents/{document_id}`.
///
/// Soft-deletes the record (sets `deleted_at`) and then tries to remove the
/// stored binaries. Blob removal is best-effort: a failure there is logged
/// and the delete still succeeds.
pub async fn process(
    ctx: web::Data<AppContext>,
    document_id: web::Path<String>,
) -> impl Responder {
    let conn = match storage::open(&ctx.config.db_path) {
        Ok(conn) => conn,
        Err(e) => {
            return HttpResponse::ServiceUnavailable()
                .body(format!("Error deleting document: {}", e))
        }
    };

    match storage::soft_delete(&conn, &document_id) {
        Ok(Some((original_path, filled_path))) => {
            if let Some(path) = original_path {
                blobs::remove(&path);
            }
            if let Some(path) = filled_path {
                blobs::remove(&path);
            }
            storage::log_activity(&conn, "deleted", "document", &document_id, None);
            HttpResponse::Ok().body("Document deleted")
        }
        Ok(None) => HttpResponse::NotFound().body("Document not found"),
        Err(e) => {
            HttpResponse::ServiceUnavailable().body(format!("Error deleting document: {}", e))
        }
    }
}
