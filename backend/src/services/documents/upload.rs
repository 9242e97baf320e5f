use crate::context::AppContext;
use crate::processor::extract::extract_text;
use crate::processor::ProcessError;
use crate::storage::{self, blobs, StoreError};
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use common::model::placeholder::PlaceholderDescriptor;
use common::requests::UploadResponse;
use futures_util::StreamExt;
use log::{error, info};
use uuid::Uuid;

/// Handler for `POST /api/documents/upload`.
///
/// Pipeline: multipart read -> text extraction -> placeholder detection ->
/// best-effort persistence. Extraction and detection failures abort the flow
/// with a user-facing message; a persistence failure only downgrades the
/// response to `saved = false` and the session continues locally.
pub async fn process(ctx: web::Data<AppContext>, payload: Multipart) -> impl Responder {
    let (file_name, bytes) = match read_upload(payload).await {
        Ok(parts) => parts,
        Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
    };

    let content = match extract_text(&bytes) {
        Ok(content) => content,
        Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
    };

    let placeholders = match ctx.detector.detect(&content).await {
        Ok(placeholders) => placeholders,
        Err(e) => return HttpResponse::ServiceUnavailable().body(e.to_string()),
    };

    let document_id = Uuid::new_v4().to_string();
    let saved = match save_upload(&ctx, &document_id, &file_name, &content, &placeholders, &bytes)
    {
        Ok(()) => true,
        Err(e) => {
            // A failed save never invalidates the user's progress; the UI
            // keeps working against the in-memory session.
            error!("Persisting upload {} failed: {}", document_id, e);
            false
        }
    };

    info!(
        "Processed {} ({} placeholders, saved={})",
        file_name,
        placeholders.len(),
        saved
    );

    HttpResponse::Ok().json(UploadResponse {
        document_id,
        file_name,
        content,
        placeholders,
        saved,
    })
}

/// Reads the multipart `file` field, enforcing the `.docx` extension.
async fn read_upload(mut payload: Multipart) -> Result<(String, Vec<u8>), ProcessError> {
    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| ProcessError::InvalidInput(e.to_string()))?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));
        if name.as_deref() != Some("file") {
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .unwrap_or_default();
        if !filename.ends_with(".docx") {
            return Err(ProcessError::InvalidInput(
                "the file must end with .docx".to_string(),
            ));
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| ProcessError::InvalidInput(e.to_string()))?;
            bytes.extend_from_slice(&chunk);
        }
        return Ok((filename, bytes));
    }
    Err(ProcessError::InvalidInput("missing file field".to_string()))
}

fn save_upload(
    ctx: &AppContext,
    document_id: &str,
    file_name: &str,
    content: &str,
    placeholders: &[PlaceholderDescriptor],
    bytes: &[u8],
) -> Result<(), StoreError> {
    let conn = storage::open(&ctx.config.db_path)?;
    let original_path = blobs::store_original(&ctx.config.storage_dir, document_id, bytes)?;
    storage::insert_document(
        &conn,
        document_id,
        file_name,
        content,
        &original_path,
        placeholders,
    )?;
    storage::log_activity(&conn, "uploaded", "document", document_id, Some(file_name));
    Ok(())
}
