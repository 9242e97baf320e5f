use crate::processor::export::{normalized_filename, render, ExportFormat};
use actix_web::{web, HttpResponse, Responder};
use common::fill;
use common::requests::{ExportRequest, ValidationErrors};

/// Handler for `POST /api/export`.
///
/// Validates the descriptor set, substitutes values into the extracted text,
/// and returns the rendered file as an attachment.
pub async fn process(payload: web::Json<ExportRequest>) -> impl Responder {
    let Some(format) = ExportFormat::parse(&payload.format) else {
        return HttpResponse::BadRequest()
            .body(format!("Unknown export format: {}", payload.format));
    };

    let errors = fill::validate(&payload.placeholders);
    if !errors.is_empty() {
        return HttpResponse::UnprocessableEntity().json(ValidationErrors { errors });
    }

    let filled = fill::substitute(&payload.content, &payload.placeholders);
    let file_name = normalized_filename(&payload.file_name, format);

    match render(&filled, &file_name, format) {
        Ok(bytes) => HttpResponse::Ok()
            .content_type(format.content_type())
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", file_name),
            ))
            .body(bytes),
        Err(e) => {
            HttpResponse::ServiceUnavailable().body(format!("Export failed: {}", e))
        }
    }
}
