use crate::context::AppContext;
use crate::storage;
use actix_web::{web, HttpResponse, Responder};

/// Handler for `GET /api/documents/{document_id}`.
///
/// Returns the document record with its placeholders in detection order, or
/// `404` for unknown and soft-deleted ids.
pub async fn process(
    ctx: web::Data<AppContext>,
    document_id: web::Path<String>,
) -> impl Responder {
    let conn = match storage::open(&ctx.config.db_path) {
        Ok(conn) => conn,
        Err(e) => {
            return HttpResponse::ServiceUnavailable()
                .body(format!("Error retrieving document: {}", e))
        }
    };

    match storage::get_document(&conn, &document_id) {
        Ok(Some(detail)) => HttpResponse::Ok().json(detail),
        Ok(None) => HttpResponse::NotFound().body("Document not found"),
        Err(e) => {
            HttpResponse::ServiceUnavailable().body(format!("Error retrieving document: {}", e))
        }
    }
}
