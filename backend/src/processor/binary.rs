//! In-place rewrite of the uploaded package.
//!
//! The original archive is read entry by entry in order, the body markup is
//! run through the same positional substitution core the live preview uses
//! (values additionally XML-escaped), and every entry is written back out.
//! All surrounding structure — styles, numbering, headers, media — passes
//! through untouched, so the exported file keeps the source formatting.

use super::extract::DOCUMENT_BODY_ENTRY;
use super::{escape_xml, ProcessError};
use common::fill::{format_value, substitute_with};
use common::model::placeholder::PlaceholderDescriptor;
use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Rewrites placeholder occurrences inside the package's document body and
/// returns the re-serialized archive. The input buffer is never mutated.
///
/// Fails with [`ProcessError::PackageFormat`] when the input is not a readable
/// archive or the body entry is absent (non-`.docx` or corrupt upload).
pub fn rewrite_package(
    original: &[u8],
    descriptors: &[PlaceholderDescriptor],
) -> Result<Vec<u8>, ProcessError> {
    let mut archive =
        ZipArchive::new(Cursor::new(original)).map_err(|_| ProcessError::PackageFormat)?;

    // Read all entries up front, preserving archive order.
    let mut entries: Vec<(String, Vec<u8>)> = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|_| ProcessError::PackageFormat)?;
        let name = entry.name().to_string();
        let mut data = Vec::new();
        entry
            .read_to_end(&mut data)
            .map_err(|_| ProcessError::PackageFormat)?;
        entries.push((name, data));
    }

    let body_index = entries
        .iter()
        .position(|(name, _)| name == DOCUMENT_BODY_ENTRY)
        .ok_or(ProcessError::PackageFormat)?;

    let body_xml = String::from_utf8(std::mem::take(&mut entries[body_index].1))
        .map_err(|_| ProcessError::PackageFormat)?;
    let rewritten = substitute_with(&body_xml, descriptors, |d| {
        format_value(d).map(|value| escape_xml(&value))
    });
    entries[body_index].1 = rewritten.into_bytes();

    write_entries(&entries)
}

/// Serializes the entry list back into an archive: media stored, everything
/// else deflated, matching the layout word processors expect.
fn write_entries(entries: &[(String, Vec<u8>)]) -> Result<Vec<u8>, ProcessError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut writer = ZipWriter::new(&mut buf);
        let deflated =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

        for (name, data) in entries {
            let opts = if name.starts_with("word/media/") {
                stored
            } else {
                deflated
            };
            writer
                .start_file(name.as_str(), opts)
                .map_err(|e| ProcessError::Render("docx", e.to_string()))?;
            writer
                .write_all(data)
                .map_err(|e| ProcessError::Render("docx", e.to_string()))?;
        }
        writer
            .finish()
            .map_err(|e| ProcessError::Render("docx", e.to_string()))?;
    }
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::extract::extract_text;
    use common::model::placeholder::PlaceholderType;

    fn descriptor(match_text: &str, value: &str) -> PlaceholderDescriptor {
        PlaceholderDescriptor {
            id: format!("{}_0", match_text),
            label: match_text.to_string(),
            match_text: match_text.to_string(),
            value: value.to_string(),
            is_filled: !value.trim().is_empty(),
            field_type: PlaceholderType::Text,
            prompt: None,
            validation_note: None,
        }
    }

    fn package_with_body(body_xml: &str) -> Vec<u8> {
        let entries = vec![
            (
                "[Content_Types].xml".to_string(),
                b"<Types/>".to_vec(),
            ),
            (DOCUMENT_BODY_ENTRY.to_string(), body_xml.as_bytes().to_vec()),
        ];
        write_entries(&entries).unwrap()
    }

    #[test]
    fn no_matches_round_trips_the_text() {
        let package =
            package_with_body("<w:p><w:r><w:t>Nothing to fill here.</w:t></w:r></w:p>");
        let before = extract_text(&package).unwrap();
        let rewritten = rewrite_package(&package, &[descriptor("_____", "value")]).unwrap();
        assert_eq!(extract_text(&rewritten).unwrap(), before);
    }

    #[test]
    fn values_are_substituted_and_xml_escaped() {
        let package = package_with_body("<w:p><w:r><w:t>Client: [Name]</w:t></w:r></w:p>");
        let rewritten =
            rewrite_package(&package, &[descriptor("[Name]", "Smith & Jones")]).unwrap();
        assert_eq!(
            extract_text(&rewritten).unwrap(),
            "Client: Smith & Jones"
        );
    }

    #[test]
    fn duplicate_match_text_is_positional_in_the_binary_pass() {
        let package = package_with_body(
            "<w:p><w:r><w:t>Lessor: _____</w:t></w:r></w:p>\
             <w:p><w:r><w:t>Lessee: _____</w:t></w:r></w:p>",
        );
        let descriptors = vec![descriptor("_____", "A"), descriptor("_____", "B")];
        let rewritten = rewrite_package(&package, &descriptors).unwrap();
        assert_eq!(
            extract_text(&rewritten).unwrap(),
            "Lessor: A\nLessee: B"
        );
    }

    #[test]
    fn unfilled_descriptors_leave_their_occurrence() {
        let package = package_with_body("<w:p><w:r><w:t>Sign here: _____</w:t></w:r></w:p>");
        let rewritten = rewrite_package(&package, &[descriptor("_____", "")]).unwrap();
        assert_eq!(extract_text(&rewritten).unwrap(), "Sign here: _____");
    }

    #[test]
    fn archive_without_body_entry_is_a_package_error() {
        let entries = vec![("other.xml".to_string(), b"<x/>".to_vec())];
        let package = write_entries(&entries).unwrap();
        let err = rewrite_package(&package, &[]).unwrap_err();
        assert!(matches!(err, ProcessError::PackageFormat));
    }

    #[test]
    fn garbage_input_is_a_package_error() {
        let err = rewrite_package(b"not an archive", &[]).unwrap_err();
        assert!(matches!(err, ProcessError::PackageFormat));
    }
}
