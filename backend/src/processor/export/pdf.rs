//! PDF rendering via genpdf: one paragraph per line, blank lines become
//! explicit breaks, wrapping and pagination are left to the layout engine.

use crate::processor::ProcessError;
use genpdf::elements::{Break, Paragraph};
use genpdf::Document;

/// Load the font family (adjust path/name if needed).
fn load_font() -> Result<genpdf::fonts::FontFamily<genpdf::fonts::FontData>, ProcessError> {
    // Prefer Arial if its TTFs were dropped into ./fonts, otherwise fall back
    // to LiberationSans from the same directory.
    if let Ok(family) = genpdf::fonts::from_files("./fonts", "Arial", None) {
        return Ok(family);
    }
    genpdf::fonts::from_files("./fonts", "LiberationSans", None)
        .map_err(|e| ProcessError::Render("pdf", e.to_string()))
}

fn configure_document() -> Result<Document, ProcessError> {
    let font_family = load_font()?;
    let mut doc = Document::new(font_family);
    doc.set_title("Filled document");
    doc.set_font_size(11);
    doc.set_line_spacing(1.0);

    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(10);
    doc.set_page_decorator(decorator);
    Ok(doc)
}

pub fn render(text: &str) -> Result<Vec<u8>, ProcessError> {
    let mut doc = configure_document()?;

    // Do not trim lines: empty lines are meaningful spacing in legal text.
    for line in text.split('\n') {
        if line.is_empty() {
            doc.push(Break::new(1));
        } else {
            doc.push(Paragraph::new(line));
        }
    }

    let mut out = Vec::new();
    doc.render(&mut out)
        .map_err(|e| ProcessError::Render("pdf", e.to_string()))?;
    Ok(out)
}
