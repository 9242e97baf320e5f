//! Plain-text extraction from uploaded document packages.
//!
//! The package is treated as an opaque ZIP+XML blob: the single body entry is
//! decoded, paragraph and break markup become newlines/tabs, remaining tags
//! are stripped, and entities are unescaped. No attempt is made to interpret
//! styling, tables beyond their text, or section structure.

use super::ProcessError;
use regex::Regex;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Archive entry holding the main body markup.
pub const DOCUMENT_BODY_ENTRY: &str = "word/document.xml";

/// Pulls the readable text out of an uploaded `.docx` byte buffer.
pub fn extract_text(bytes: &[u8]) -> Result<String, ProcessError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|_| ProcessError::Extraction)?;
    let mut entry = archive
        .by_name(DOCUMENT_BODY_ENTRY)
        .map_err(|_| ProcessError::Extraction)?;
    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|_| ProcessError::Extraction)?;
    body_markup_to_text(&xml)
}

/// Converts body markup to plain text. Paragraph closes become newlines,
/// explicit breaks and tabs are kept, every other tag is dropped.
pub fn body_markup_to_text(xml: &str) -> Result<String, ProcessError> {
    let with_breaks = xml
        .replace("</w:p>", "</w:p>\n")
        .replace("<w:br/>", "\n")
        .replace("<w:tab/>", "\t");

    let tag_re = Regex::new(r"<[^>]*>").map_err(|_| ProcessError::Extraction)?;
    let stripped = tag_re.replace_all(&with_breaks, "");

    Ok(unescape_entities(stripped.trim_end()))
}

fn unescape_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_become_lines() {
        let xml = "<w:document><w:body>\
                   <w:p><w:r><w:t>First paragraph</w:t></w:r></w:p>\
                   <w:p><w:r><w:t>Second paragraph</w:t></w:r></w:p>\
                   </w:body></w:document>";
        let text = body_markup_to_text(xml).unwrap();
        assert_eq!(text, "First paragraph\nSecond paragraph");
    }

    #[test]
    fn split_runs_are_joined() {
        let xml = "<w:p><w:r><w:t>By:</w:t></w:r><w:r><w:t xml:space=\"preserve\"> </w:t></w:r></w:p>";
        assert_eq!(body_markup_to_text(xml).unwrap(), "By:");
    }

    #[test]
    fn entities_are_unescaped() {
        let xml = "<w:p><w:r><w:t>Smith &amp; Jones &lt;LLC&gt;</w:t></w:r></w:p>";
        assert_eq!(body_markup_to_text(xml).unwrap(), "Smith & Jones <LLC>");
    }

    #[test]
    fn breaks_and_tabs_survive() {
        let xml = "<w:p><w:r><w:t>a</w:t><w:br/><w:t>b</w:t><w:tab/><w:t>c</w:t></w:r></w:p>";
        assert_eq!(body_markup_to_text(xml).unwrap(), "a\nb\tc");
    }

    #[test]
    fn non_archive_input_is_an_extraction_error() {
        let err = extract_text(b"this is not a zip file").unwrap_err();
        assert!(matches!(err, ProcessError::Extraction));
    }
}
