//! Utility functions for the fill assistant component: toast notifications,
//! browser download triggering, and export filename/MIME mapping.

use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// MIME type for a text-export format string (`docx`/`pdf`/`html`).
pub fn content_type_for(format: &str) -> &'static str {
    match format {
        "pdf" => "application/pdf",
        "html" => "text/html",
        _ => DOCX_MIME,
    }
}

/// Mirrors the backend's filename normalization so the anchor's `download`
/// attribute matches the attachment name: append the canonical extension,
/// and for HTML strip leftover `.docx`/`.pdf` fragments first.
pub fn download_name(name: &str, format: &str) -> String {
    match format {
        "pdf" if name.ends_with(".pdf") => name.to_string(),
        "pdf" => format!("{}.pdf", name),
        "html" => {
            let base = name.replace(".docx", "").replace(".pdf", "");
            if base.ends_with(".html") {
                base
            } else {
                format!("{}.html", base)
            }
        }
        _ if name.ends_with(".docx") => name.to_string(),
        _ => format!("{}.docx", name),
    }
}

/// Creates an object URL for `bytes` and clicks a transient anchor to save
/// the file client-side.
pub fn trigger_download(file_name: &str, bytes: &[u8], content_type: &str) {
    let blob = gloo_file::Blob::new_with_options(bytes, Some(content_type));
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Ok(url) = web_sys::Url::create_object_url_with_blob(blob.as_ref()) else {
        return;
    };

    if let (Ok(anchor), Some(body)) = (document.create_element("a"), document.body()) {
        let _ = anchor.set_attribute("href", &url);
        let _ = anchor.set_attribute("download", file_name);
        if body.append_child(&anchor).is_ok() {
            let html_anchor: HtmlElement = anchor.unchecked_into();
            html_anchor.click();
            let _ = body.remove_child(&html_anchor);
        }
    }
    let _ = web_sys::Url::revoke_object_url(&url);
}

/// Displays a temporary notification message at the bottom of the screen.
/// Non-blocking feedback for uploads, saves, and exports; removes itself
/// after a few seconds.
pub fn show_toast(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
                toast.set_text_content(Some(message));
                let html_toast: HtmlElement = toast.unchecked_into();
                let style = html_toast.style();
                style.set_property("position", "fixed").ok();
                style.set_property("bottom", "20px").ok();
                style.set_property("left", "50%").ok();
                style.set_property("transform", "translateX(-50%)").ok();
                style.set_property("background", "rgba(0, 0, 0, 0.8)").ok();
                style.set_property("color", "#fff").ok();
                style.set_property("padding", "10px 20px").ok();
                style.set_property("border-radius", "4px").ok();
                style.set_property("z-index", "10000").ok();
                style.set_property("font-family", "Arial, sans-serif").ok();

                if body.append_child(&html_toast).is_ok() {
                    wasm_bindgen_futures::spawn_local(async move {
                        gloo_timers::future::TimeoutFuture::new(3000).await;
                        if let Some(parent) = html_toast.parent_node() {
                            parent.remove_child(&html_toast).ok();
                        }
                    });
                }
            }
        }
    }
}
