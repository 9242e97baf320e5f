//! Minimal OOXML package assembly: one paragraph per input line, zipped with
//! the three parts a word processor needs to open the file.

use crate::processor::{escape_xml, ProcessError};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

pub fn render(text: &str) -> Result<Vec<u8>, ProcessError> {
    let document_xml = build_document_xml(text);

    let mut buf = Cursor::new(Vec::new());
    {
        let mut writer = ZipWriter::new(&mut buf);
        let deflated =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let parts: [(&str, &str); 3] = [
            ("[Content_Types].xml", CONTENT_TYPES),
            ("_rels/.rels", PACKAGE_RELS),
            ("word/document.xml", &document_xml),
        ];
        for (name, data) in parts {
            writer
                .start_file(name, deflated)
                .map_err(|e| ProcessError::Render("docx", e.to_string()))?;
            writer
                .write_all(data.as_bytes())
                .map_err(|e| ProcessError::Render("docx", e.to_string()))?;
        }
        writer
            .finish()
            .map_err(|e| ProcessError::Render("docx", e.to_string()))?;
    }
    Ok(buf.into_inner())
}

fn build_document_xml(text: &str) -> String {
    let mut body = String::new();
    for line in text.split('\n') {
        // A blank line becomes a single-space paragraph so empty lines are
        // not collapsed by the word processor.
        let content = if line.is_empty() { " " } else { line };
        body.push_str("<w:p><w:r><w:t xml:space=\"preserve\">");
        body.push_str(&escape_xml(content));
        body.push_str("</w:t></w:r></w:p>");
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{}</w:body></w:document>",
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::extract::extract_text;

    #[test]
    fn rendered_package_extracts_back_to_the_text() {
        let text = "AGREEMENT\n\nThis lease is between A and B.";
        let package = render(text).unwrap();
        // The blank line survives as a single-space paragraph.
        assert_eq!(
            extract_text(&package).unwrap(),
            "AGREEMENT\n \nThis lease is between A and B."
        );
    }

    #[test]
    fn markup_characters_are_escaped() {
        let package = render("Smith & Jones <LLC>").unwrap();
        assert_eq!(extract_text(&package).unwrap(), "Smith & Jones <LLC>");
    }

    #[test]
    fn package_has_the_three_required_parts() {
        let package = render("x").unwrap();
        let mut archive =
            zip::ZipArchive::new(std::io::Cursor::new(package.as_slice())).unwrap();
        for name in ["[Content_Types].xml", "_rels/.rels", "word/document.xml"] {
            assert!(archive.by_name(name).is_ok(), "missing entry {}", name);
        }
    }
}
