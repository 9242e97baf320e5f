use crate::context::AppContext;
use crate::processor::binary::rewrite_package;
use crate::processor::ProcessError;
use crate::storage::{self, blobs, StoreError};
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use common::fill;
use common::model::placeholder::PlaceholderDescriptor;
use common::requests::ValidationErrors;
use futures_util::StreamExt;
use log::error;

/// Parts of the multipart body: the original package, the descriptor list,
/// and optionally the persisted document id to attach the filled copy to.
struct BinaryExportRequest {
    file_name: String,
    bytes: Vec<u8>,
    placeholders: Vec<PlaceholderDescriptor>,
    document_id: Option<String>,
}

/// Handler for `POST /api/export/binary`.
///
/// Rewrites the placeholder occurrences directly inside the uploaded package
/// so the exported file keeps the original formatting, tables, and layout.
/// When a `document_id` is present the filled copy is also stored and the
/// record marked completed — best-effort, a storage failure only logs.
pub async fn process(ctx: web::Data<AppContext>, payload: Multipart) -> impl Responder {
    let request = match read_request(payload).await {
        Ok(request) => request,
        Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
    };

    let errors = fill::validate(&request.placeholders);
    if !errors.is_empty() {
        return HttpResponse::UnprocessableEntity().json(ValidationErrors { errors });
    }

    let rewritten = match rewrite_package(&request.bytes, &request.placeholders) {
        Ok(bytes) => bytes,
        Err(e) => return HttpResponse::UnprocessableEntity().body(e.to_string()),
    };

    if let Some(document_id) = &request.document_id {
        if let Err(e) = store_filled_copy(&ctx, document_id, &rewritten) {
            error!("Storing filled copy of {} failed: {}", document_id, e);
        }
    }

    let base = request
        .file_name
        .strip_suffix(".docx")
        .unwrap_or(&request.file_name);
    HttpResponse::Ok()
        .content_type(
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        )
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}_filled.docx\"", base),
        ))
        .body(rewritten)
}

async fn read_request(mut payload: Multipart) -> Result<BinaryExportRequest, ProcessError> {
    let mut file_name = String::new();
    let mut bytes: Option<Vec<u8>> = None;
    let mut placeholders: Option<Vec<PlaceholderDescriptor>> = None;
    let mut document_id: Option<String> = None;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| ProcessError::InvalidInput(e.to_string()))?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| ProcessError::InvalidInput(e.to_string()))?;
            data.extend_from_slice(&chunk);
        }

        match name.as_deref() {
            Some("file") => {
                file_name = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
                    .unwrap_or_else(|| "document.docx".to_string());
                bytes = Some(data);
            }
            Some("placeholders") => {
                placeholders = Some(
                    serde_json::from_slice(&data)
                        .map_err(|e| ProcessError::InvalidInput(e.to_string()))?,
                );
            }
            Some("document_id") => {
                let id = String::from_utf8(data)
                    .map_err(|e| ProcessError::InvalidInput(e.to_string()))?;
                if !id.trim().is_empty() {
                    document_id = Some(id);
                }
            }
            _ => {}
        }
    }

    Ok(BinaryExportRequest {
        file_name,
        bytes: bytes
            .ok_or_else(|| ProcessError::InvalidInput("missing file field".to_string()))?,
        placeholders: placeholders.ok_or_else(|| {
            ProcessError::InvalidInput("missing placeholders field".to_string())
        })?,
        document_id,
    })
}

fn store_filled_copy(
    ctx: &AppContext,
    document_id: &str,
    rewritten: &[u8],
) -> Result<(), StoreError> {
    let conn = storage::open(&ctx.config.db_path)?;
    let Some(original_path) = storage::original_path(&conn, document_id)? else {
        return Ok(());
    };
    let filled_path = blobs::store_filled(&original_path, rewritten)?;
    storage::mark_completed(&conn, document_id, &filled_path)?;
    storage::log_activity(&conn, "exported", "document", document_id, Some(&filled_path));
    Ok(())
}
