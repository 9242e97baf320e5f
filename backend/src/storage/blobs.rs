//! On-disk blob store for uploaded and filled document binaries.
//!
//! Files are keyed by document id plus a content hash so re-uploads of the
//! same bytes map to the same path. Removal is best-effort: a failed delete
//! is logged and never blocks the metadata soft delete.

use super::StoreError;
use log::warn;
use std::fs;
use std::path::Path;

/// Writes the uploaded binary and returns its storage path.
pub fn store_original(dir: &str, document_id: &str, bytes: &[u8]) -> Result<String, StoreError> {
    fs::create_dir_all(dir)?;
    let digest = format!("{:x}", md5::compute(bytes));
    let path = Path::new(dir).join(format!("{}_{}.docx", document_id, digest));
    fs::write(&path, bytes)?;
    Ok(path.to_string_lossy().into_owned())
}

/// Writes the filled binary next to the original, `_filled` before the
/// extension, and returns its path.
pub fn store_filled(original_path: &str, bytes: &[u8]) -> Result<String, StoreError> {
    let path = filled_path_for(original_path);
    fs::write(&path, bytes)?;
    Ok(path)
}

pub fn filled_path_for(original_path: &str) -> String {
    match original_path.rsplit_once('.') {
        Some((stem, ext)) => format!("{}_filled.{}", stem, ext),
        None => format!("{}_filled", original_path),
    }
}

/// Best-effort removal of a stored file.
pub fn remove(path: &str) {
    if let Err(e) = fs::remove_file(path) {
        warn!("Failed to remove stored file {}: {}", path, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_path_keeps_the_extension() {
        assert_eq!(
            filled_path_for("storage/doc1_abc.docx"),
            "storage/doc1_abc_filled.docx"
        );
        assert_eq!(filled_path_for("noext"), "noext_filled");
    }
}
