use crate::context::AppContext;
use crate::storage;
use actix_web::{web, HttpResponse, Responder};

/// Handler for `GET /api/documents`: non-deleted summaries, newest first.
pub async fn process(ctx: web::Data<AppContext>) -> impl Responder {
    match list_documents(&ctx) {
        Ok(documents) => HttpResponse::Ok().json(documents),
        Err(e) => HttpResponse::ServiceUnavailable()
            .body(format!("Error retrieving documents: {}", e)),
    }
}

fn list_documents(
    ctx: &AppContext,
) -> Result<Vec<common::model::document::DocumentSummary>, storage::StoreError> {
    let conn = storage::open(&ctx.config.db_path)?;
    storage::list_documents(&conn)
}
