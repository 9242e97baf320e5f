//! Update function for the fill assistant component.
//!
//! Elm-style: receives the current state, the `Context`, and a `Msg`, mutates
//! the state, and returns whether the view should re-render.
//!
//! Key behaviors
//! - Upload handling: file -> multipart POST -> session replacement. Results
//!   are tagged with an upload generation and stale ones are dropped, so an
//!   in-flight response can never resurrect a reset or replaced session.
//! - Conversation flow: submitting an answer fills the active placeholder and
//!   advances the cursor; selecting a filled one enters edit mode.
//! - Persistence is best-effort: a rejected save flips the session to
//!   local-only mode and the user keeps working.
//! - Export: client-side validation first, then the backend renders the file
//!   and the helpers trigger the browser download.

use common::model::session::DocumentSession;
use common::requests::{
    ExportRequest, PlaceholderValue, SaveValuesRequest, ValidationErrors,
};
use gloo_console::error;
use gloo_file::{futures::read_as_bytes, Blob};
use gloo_net::http::Request;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::helpers::{content_type_for, download_name, show_toast, trigger_download, DOCX_MIME};
use super::messages::Msg;
use super::state::AssistantComponent;

/// Central update function for the component.
pub fn update(
    component: &mut AssistantComponent,
    ctx: &Context<AssistantComponent>,
    msg: Msg,
) -> bool {
    match msg {
        Msg::OpenFileDialog => {
            if let Some(input) = component
                .file_input_ref
                .cast::<web_sys::HtmlInputElement>()
            {
                input.click();
            }
            false
        }

        Msg::FileSelected(file) => {
            component.upload_seq += 1;
            let seq = component.upload_seq;
            component.processing = true;
            component.error = None;
            component.validation_errors.clear();

            let file_name = file.name();
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = upload_document(&file_name, file).await;
                link.send_message(Msg::UploadFinished { seq, result });
            });
            true
        }

        Msg::UploadFinished { seq, result } => {
            if seq != component.upload_seq {
                // A newer upload (or a reset) superseded this response.
                return false;
            }
            component.processing = false;
            match result {
                Ok((response, bytes)) => {
                    let mut session = DocumentSession::new(
                        response.file_name,
                        response.content,
                        response.placeholders,
                    );
                    session.saved = response.saved;
                    if response.saved {
                        session.document_id = Some(response.document_id);
                    }
                    let count = session.placeholders.len();
                    component.session = Some(session);
                    component.original_binary = Some(bytes);
                    component.sync_input_to_current();
                    if count == 0 {
                        show_toast("No empty fields were detected in this document.");
                    } else {
                        show_toast(&format!("Document processed: {} fields to fill.", count));
                    }
                }
                Err(message) => {
                    component.error = Some(message);
                }
            }
            true
        }

        Msg::InputChanged(value) => {
            component.input_value = value;
            true
        }

        Msg::Submit => {
            let value = component.input_value.trim().to_string();
            let Some(session) = component.session.as_mut() else {
                return false;
            };
            let Some(current) = session.current() else {
                return false;
            };
            let descriptor_id = current.id.clone();
            if !session.submit_value(&value) {
                return false;
            }
            component.validation_errors.clear();

            // Best-effort persistence of the answered value.
            if session.saved {
                if let Some(document_id) = session.document_id.clone() {
                    save_value(ctx, document_id, descriptor_id, value);
                }
            }

            component.sync_input_to_current();
            true
        }

        Msg::Select(index) => {
            if let Some(session) = component.session.as_mut() {
                session.select(index);
            }
            component.sync_input_to_current();
            true
        }

        Msg::Export(format) => {
            let Some(session) = component.session.as_ref() else {
                return false;
            };
            let errors = common::fill::validate(&session.placeholders);
            if !errors.is_empty() {
                component.validation_errors = errors;
                return true;
            }
            component.validation_errors.clear();
            component.exporting = true;

            let payload = ExportRequest {
                file_name: session.file_name.clone(),
                format: format.to_string(),
                content: session.original_text.clone(),
                placeholders: session.placeholders.clone(),
            };
            let file_name = download_name(&session.file_name, format);
            let content_type = content_type_for(format);
            let link = ctx.link().clone();
            spawn_local(async move {
                let request = Request::post("/api/export").json(&payload).unwrap();
                match request.send().await {
                    Ok(response) if response.status() == 200 => {
                        match response.binary().await {
                            Ok(bytes) => link.send_message(Msg::ExportFinished {
                                file_name,
                                content_type,
                                bytes,
                            }),
                            Err(err) => link.send_message(Msg::ExportFailed(err.to_string())),
                        }
                    }
                    Ok(response) if response.status() == 422 => {
                        let errors = response
                            .json::<ValidationErrors>()
                            .await
                            .map(|v| v.errors)
                            .unwrap_or_else(|_| vec!["Validation failed".to_string()]);
                        link.send_message(Msg::ExportBlocked(errors));
                    }
                    Ok(response) => {
                        let message = response.text().await.unwrap_or_default();
                        link.send_message(Msg::ExportFailed(message));
                    }
                    Err(err) => link.send_message(Msg::ExportFailed(err.to_string())),
                }
            });
            true
        }

        Msg::ExportBinary => {
            let Some(session) = component.session.as_ref() else {
                return false;
            };
            let Some(bytes) = component.original_binary.clone() else {
                return false;
            };
            let errors = common::fill::validate(&session.placeholders);
            if !errors.is_empty() {
                component.validation_errors = errors;
                return true;
            }
            component.validation_errors.clear();
            component.exporting = true;

            let file_name = session.file_name.clone();
            let placeholders_json =
                serde_json::to_string(&session.placeholders).unwrap_or_else(|_| "[]".to_string());
            let document_id = session.document_id.clone().unwrap_or_default();
            let base = file_name
                .strip_suffix(".docx")
                .unwrap_or(&file_name)
                .to_string();
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = export_binary(&file_name, &bytes, &placeholders_json, &document_id)
                    .await;
                match result {
                    Ok(bytes) => link.send_message(Msg::ExportFinished {
                        file_name: format!("{}_filled.docx", base),
                        content_type: DOCX_MIME,
                        bytes,
                    }),
                    Err(ExportError::Blocked(errors)) => {
                        link.send_message(Msg::ExportBlocked(errors))
                    }
                    Err(ExportError::Failed(message)) => {
                        link.send_message(Msg::ExportFailed(message))
                    }
                }
            });
            true
        }

        Msg::ExportFinished {
            file_name,
            content_type,
            bytes,
        } => {
            component.exporting = false;
            trigger_download(&file_name, &bytes, content_type);
            show_toast(&format!("Saved {}.", file_name));
            true
        }

        Msg::ExportBlocked(errors) => {
            component.exporting = false;
            component.validation_errors = errors;
            true
        }

        Msg::ExportFailed(message) => {
            component.exporting = false;
            error!("Export failed:", message.clone());
            show_toast(&format!("Export failed: {}", message));
            true
        }

        Msg::SaveFailed(message) => {
            error!("Saving progress failed:", message);
            if let Some(session) = component.session.as_mut() {
                session.saved = false;
            }
            show_toast("Saving progress failed; your answers are kept locally.");
            true
        }

        Msg::Reset => {
            let seq = component.upload_seq;
            *component = AssistantComponent::new();
            // Keep the generation monotonic so in-flight uploads stay stale.
            component.upload_seq = seq + 1;
            true
        }
    }
}

async fn upload_document(
    file_name: &str,
    file: web_sys::File,
) -> Result<(common::requests::UploadResponse, Vec<u8>), String> {
    let bytes = read_as_bytes(&Blob::from(file))
        .await
        .map_err(|e| e.to_string())?;

    let form = web_sys::FormData::new().map_err(|_| "Failed to build form data".to_string())?;
    let upload_blob = Blob::new_with_options(bytes.as_slice(), Some(DOCX_MIME));
    form.append_with_blob_and_filename("file", upload_blob.as_ref(), file_name)
        .map_err(|_| "Failed to build form data".to_string())?;

    let response = Request::post("/api/documents/upload")
        .body(form)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status() != 200 {
        return Err(response
            .text()
            .await
            .unwrap_or_else(|_| "Upload failed".to_string()));
    }

    let parsed = response.json().await.map_err(|e| e.to_string())?;
    Ok((parsed, bytes))
}

enum ExportError {
    Blocked(Vec<String>),
    Failed(String),
}

async fn export_binary(
    file_name: &str,
    bytes: &[u8],
    placeholders_json: &str,
    document_id: &str,
) -> Result<Vec<u8>, ExportError> {
    let form = web_sys::FormData::new()
        .map_err(|_| ExportError::Failed("Failed to build form data".to_string()))?;
    let blob = Blob::new_with_options(bytes, Some(DOCX_MIME));
    form.append_with_blob_and_filename("file", blob.as_ref(), file_name)
        .map_err(|_| ExportError::Failed("Failed to build form data".to_string()))?;
    form.append_with_str("placeholders", placeholders_json)
        .map_err(|_| ExportError::Failed("Failed to build form data".to_string()))?;
    if !document_id.is_empty() {
        form.append_with_str("document_id", document_id)
            .map_err(|_| ExportError::Failed("Failed to build form data".to_string()))?;
    }

    let response = Request::post("/api/export/binary")
        .body(form)
        .map_err(|e| ExportError::Failed(e.to_string()))?
        .send()
        .await
        .map_err(|e| ExportError::Failed(e.to_string()))?;

    match response.status() {
        200 => response
            .binary()
            .await
            .map_err(|e| ExportError::Failed(e.to_string())),
        422 => {
            let errors = response
                .json::<ValidationErrors>()
                .await
                .map(|v| v.errors)
                .unwrap_or_else(|_| vec!["Validation failed".to_string()]);
            Err(ExportError::Blocked(errors))
        }
        _ => Err(ExportError::Failed(
            response.text().await.unwrap_or_default(),
        )),
    }
}

fn save_value(
    ctx: &Context<AssistantComponent>,
    document_id: String,
    descriptor_id: String,
    value: String,
) {
    let payload = SaveValuesRequest {
        values: vec![PlaceholderValue {
            id: descriptor_id,
            value,
        }],
    };
    let link = ctx.link().clone();
    spawn_local(async move {
        let request = Request::post(&format!("/api/documents/{}/placeholders", document_id))
            .json(&payload)
            .unwrap();
        match request.send().await {
            Ok(response) if response.status() == 200 => {}
            Ok(response) => {
                let message = response.text().await.unwrap_or_default();
                link.send_message(Msg::SaveFailed(message));
            }
            Err(err) => link.send_message(Msg::SaveFailed(err.to_string())),
        }
    });
}
