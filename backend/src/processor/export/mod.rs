//! Export rendering for the filled document text.
//!
//! Three targets: a minimal OOXML package, a paginated PDF, and static HTML.
//! Each renderer takes the already-substituted plain text; validation happens
//! at the HTTP layer before anything is rendered.

mod docx;
mod html;
mod pdf;

use super::ProcessError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Docx,
    Pdf,
    Html,
}

impl ExportFormat {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "docx" => Some(ExportFormat::Docx),
            "pdf" => Some(ExportFormat::Pdf),
            "html" => Some(ExportFormat::Html),
            _ => None,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Html => "text/html; charset=utf-8",
        }
    }
}

/// Renders `text` into the requested format.
pub fn render(text: &str, file_name: &str, format: ExportFormat) -> Result<Vec<u8>, ProcessError> {
    match format {
        ExportFormat::Docx => docx::render(text),
        ExportFormat::Pdf => pdf::render(text),
        ExportFormat::Html => Ok(html::render(text, file_name)),
    }
}

/// Appends the canonical extension when missing; switching to `html` also
/// strips leftover `.docx`/`.pdf` fragments from the name.
pub fn normalized_filename(name: &str, format: ExportFormat) -> String {
    match format {
        ExportFormat::Docx if name.ends_with(".docx") => name.to_string(),
        ExportFormat::Docx => format!("{}.docx", name),
        ExportFormat::Pdf if name.ends_with(".pdf") => name.to_string(),
        ExportFormat::Pdf => format!("{}.pdf", name),
        ExportFormat::Html => {
            let base = name.replace(".docx", "").replace(".pdf", "");
            if base.ends_with(".html") {
                base
            } else {
                format!("{}.html", base)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filenames_get_the_canonical_extension() {
        assert_eq!(
            normalized_filename("lease", ExportFormat::Docx),
            "lease.docx"
        );
        assert_eq!(
            normalized_filename("lease.docx", ExportFormat::Docx),
            "lease.docx"
        );
        assert_eq!(normalized_filename("lease", ExportFormat::Pdf), "lease.pdf");
    }

    #[test]
    fn html_strips_foreign_extensions() {
        assert_eq!(
            normalized_filename("lease.docx", ExportFormat::Html),
            "lease.html"
        );
        assert_eq!(
            normalized_filename("lease.pdf", ExportFormat::Html),
            "lease.html"
        );
        assert_eq!(
            normalized_filename("lease.html", ExportFormat::Html),
            "lease.html"
        );
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(ExportFormat::parse("rtf").is_none());
        assert_eq!(ExportFormat::parse("pdf"), Some(ExportFormat::Pdf));
    }
}
