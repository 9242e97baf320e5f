use crate::context::AppContext;
use crate::storage;
use actix_web::{web, HttpResponse, Responder};
use common::requests::SaveValuesRequest;

/// Handler for `POST /api/documents/{document_id}/placeholders`.
///
/// Persists the submitted fill values and reports the refreshed progress
/// counters. Called by the UI after each answered placeholder; a failure here
/// leaves the local session untouched, the caller just stays in local-only
/// mode for this round.
pub async fn process(
    ctx: web::Data<AppContext>,
    document_id: web::Path<String>,
    payload: web::Json<SaveValuesRequest>,
) -> impl Responder {
    match save(&ctx, &document_id, &payload) {
        Ok((filled, total)) => HttpResponse::Ok()
            .json(serde_json::json!({ "filled": filled, "total": total })),
        Err(e) => {
            HttpResponse::ServiceUnavailable().body(format!("Error saving values: {}", e))
        }
    }
}

fn save(
    ctx: &AppContext,
    document_id: &str,
    payload: &SaveValuesRequest,
) -> Result<(u32, u32), storage::StoreError> {
    let conn = storage::open(&ctx.config.db_path)?;
    let counts = storage::save_values(&conn, document_id, &payload.values)?;
    storage::log_activity(
        &conn,
        "values_saved",
        "document",
        document_id,
        Some(&format!("{} of {} filled", counts.0, counts.1)),
    );
    Ok(counts)
}
