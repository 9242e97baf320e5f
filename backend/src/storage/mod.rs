//! SQLite persistence for documents, placeholder rows, and activity logs.
//!
//! Deletion is a soft delete: `deleted_at` gets a timestamp and list queries
//! filter on it; rows are never removed. All functions return explicit
//! [`StoreError`] results so callers decide how a failure degrades — the
//! upload and fill flows log it and continue local-only rather than aborting.

pub mod blobs;

use common::model::document::{DocumentDetail, DocumentStatus, DocumentSummary};
use common::model::placeholder::{PlaceholderDescriptor, PlaceholderType};
use common::requests::PlaceholderValue;
use log::warn;
use rusqlite::{params, Connection};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),
}

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS documents (
    id                  TEXT PRIMARY KEY,
    title               TEXT NOT NULL,
    file_name           TEXT NOT NULL,
    original_text       TEXT NOT NULL,
    original_path       TEXT,
    filled_path         TEXT,
    status              TEXT NOT NULL DEFAULT 'draft',
    total_placeholders  INTEGER NOT NULL DEFAULT 0,
    filled_placeholders INTEGER NOT NULL DEFAULT 0,
    created_at          TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at          TEXT NOT NULL DEFAULT (datetime('now')),
    deleted_at          TEXT
);
CREATE TABLE IF NOT EXISTS placeholders (
    document_id     TEXT NOT NULL,
    id              TEXT NOT NULL,
    placeholder_text TEXT NOT NULL,
    label           TEXT NOT NULL,
    value           TEXT NOT NULL DEFAULT '',
    field_type      TEXT NOT NULL DEFAULT 'text',
    is_filled       INTEGER NOT NULL DEFAULT 0,
    position        INTEGER NOT NULL,
    prompt          TEXT,
    validation_note TEXT,
    PRIMARY KEY (document_id, id)
);
CREATE TABLE IF NOT EXISTS activity_logs (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    action        TEXT NOT NULL,
    resource_type TEXT NOT NULL,
    resource_id   TEXT NOT NULL,
    detail        TEXT,
    created_at    TEXT NOT NULL DEFAULT (datetime('now'))
);
";

/// Opens the database and makes sure the schema exists.
pub fn open(path: &str) -> Result<Connection, StoreError> {
    let conn = Connection::open(path)?;
    conn.execute_batch(SCHEMA)?;
    Ok(conn)
}

/// Inserts the document record and its placeholder rows in detection order.
pub fn insert_document(
    conn: &Connection,
    id: &str,
    file_name: &str,
    original_text: &str,
    original_path: &str,
    placeholders: &[PlaceholderDescriptor],
) -> Result<(), StoreError> {
    let title = file_name.strip_suffix(".docx").unwrap_or(file_name);
    conn.execute(
        "INSERT INTO documents (id, title, file_name, original_text, original_path, status, total_placeholders)
         VALUES (?1, ?2, ?3, ?4, ?5, 'draft', ?6)",
        params![id, title, file_name, original_text, original_path, placeholders.len() as u32],
    )?;

    for (position, p) in placeholders.iter().enumerate() {
        conn.execute(
            "INSERT OR REPLACE INTO placeholders
             (document_id, id, placeholder_text, label, value, field_type, is_filled, position, prompt, validation_note)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                id,
                p.id,
                p.match_text,
                p.label,
                p.value,
                p.field_type.as_str(),
                p.is_filled as i32,
                position as i64,
                p.prompt,
                p.validation_note,
            ],
        )?;
    }
    Ok(())
}

/// Non-deleted documents, newest first.
pub fn list_documents(conn: &Connection) -> Result<Vec<DocumentSummary>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, title, file_name, status, total_placeholders, filled_placeholders, created_at, updated_at
         FROM documents WHERE deleted_at IS NULL ORDER BY created_at DESC",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(DocumentSummary {
            id: row.get(0)?,
            title: row.get(1)?,
            file_name: row.get(2)?,
            status: DocumentStatus::parse(&row.get::<_, String>(3)?),
            total_placeholders: row.get(4)?,
            filled_placeholders: row.get(5)?,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    })?;
    Ok(rows.filter_map(Result::ok).collect())
}

/// Fetches one document with its placeholders ordered by detection position.
/// Returns `None` for unknown or soft-deleted ids.
pub fn get_document(conn: &Connection, id: &str) -> Result<Option<DocumentDetail>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, title, file_name, status, total_placeholders, filled_placeholders,
                created_at, updated_at, original_text
         FROM documents WHERE id = ?1 AND deleted_at IS NULL",
    )?;
    let mut rows = stmt.query_map(params![id], |row| {
        Ok((
            DocumentSummary {
                id: row.get(0)?,
                title: row.get(1)?,
                file_name: row.get(2)?,
                status: DocumentStatus::parse(&row.get::<_, String>(3)?),
                total_placeholders: row.get(4)?,
                filled_placeholders: row.get(5)?,
                created_at: row.get(6)?,
                updated_at: row.get(7)?,
            },
            row.get::<_, String>(8)?,
        ))
    })?;

    let (summary, original_text) = match rows.next() {
        Some(row) => row?,
        None => return Ok(None),
    };

    Ok(Some(DocumentDetail {
        summary,
        original_text,
        placeholders: get_placeholders(conn, id)?,
    }))
}

pub fn get_placeholders(
    conn: &Connection,
    document_id: &str,
) -> Result<Vec<PlaceholderDescriptor>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, label, placeholder_text, value, field_type, is_filled, prompt, validation_note
         FROM placeholders WHERE document_id = ?1 ORDER BY position ASC",
    )?;
    let rows = stmt.query_map(params![document_id], |row| {
        Ok(PlaceholderDescriptor {
            id: row.get(0)?,
            label: row.get(1)?,
            match_text: row.get(2)?,
            value: row.get(3)?,
            field_type: PlaceholderType::parse(&row.get::<_, String>(4)?),
            is_filled: row.get::<_, i32>(5)? != 0,
            prompt: row.get(6)?,
            validation_note: row.get(7)?,
        })
    })?;
    Ok(rows.filter_map(Result::ok).collect())
}

/// Persists fill values and refreshes the document's counters. The status
/// moves to `in_progress` unless the document already completed or archived.
/// Returns `(filled, total)` after the update.
pub fn save_values(
    conn: &Connection,
    document_id: &str,
    values: &[PlaceholderValue],
) -> Result<(u32, u32), StoreError> {
    for v in values {
        conn.execute(
            "UPDATE placeholders SET value = ?1, is_filled = ?2 WHERE document_id = ?3 AND id = ?4",
            params![v.value, !v.value.trim().is_empty() as i32, document_id, v.id],
        )?;
    }

    let (filled, total): (u32, u32) = conn.query_row(
        "SELECT COALESCE(SUM(is_filled), 0), COUNT(*) FROM placeholders WHERE document_id = ?1",
        params![document_id],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    conn.execute(
        "UPDATE documents SET filled_placeholders = ?1,
            status = CASE WHEN status IN ('draft', 'in_progress') THEN 'in_progress' ELSE status END,
            updated_at = datetime('now')
         WHERE id = ?2",
        params![filled, document_id],
    )?;

    Ok((filled, total))
}

/// Where the original binary of a live document is stored, if anywhere.
pub fn original_path(
    conn: &Connection,
    document_id: &str,
) -> Result<Option<String>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT original_path FROM documents WHERE id = ?1 AND deleted_at IS NULL",
    )?;
    let mut rows = stmt.query_map(params![document_id], |row| {
        row.get::<_, Option<String>>(0)
    })?;
    match rows.next() {
        Some(row) => Ok(row?),
        None => Ok(None),
    }
}

/// Records the stored filled binary and finishes the document.
pub fn mark_completed(
    conn: &Connection,
    document_id: &str,
    filled_path: &str,
) -> Result<(), StoreError> {
    conn.execute(
        "UPDATE documents SET filled_path = ?1, status = 'completed', updated_at = datetime('now')
         WHERE id = ?2",
        params![filled_path, document_id],
    )?;
    Ok(())
}

/// Soft-deletes the record and returns the blob paths for best-effort
/// cleanup. `None` when the id is unknown or already deleted.
pub fn soft_delete(
    conn: &Connection,
    document_id: &str,
) -> Result<Option<(Option<String>, Option<String>)>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT original_path, filled_path FROM documents WHERE id = ?1 AND deleted_at IS NULL",
    )?;
    let mut rows = stmt.query_map(params![document_id], |row| {
        Ok((row.get::<_, Option<String>>(0)?, row.get::<_, Option<String>>(1)?))
    })?;
    let paths = match rows.next() {
        Some(row) => row?,
        None => return Ok(None),
    };

    conn.execute(
        "UPDATE documents SET deleted_at = datetime('now'), updated_at = datetime('now')
         WHERE id = ?1",
        params![document_id],
    )?;
    Ok(Some(paths))
}

/// Appends an activity row. Never fatal: a logging failure is itself only
/// logged so it cannot abort the action being recorded.
pub fn log_activity(
    conn: &Connection,
    action: &str,
    resource_type: &str,
    resource_id: &str,
    detail: Option<&str>,
) {
    let result = conn.execute(
        "INSERT INTO activity_logs (action, resource_type, resource_id, detail)
         VALUES (?1, ?2, ?3, ?4)",
        params![action, resource_type, resource_id, detail],
    );
    if let Err(e) = result {
        warn!("Failed to record activity {} on {}: {}", action, resource_id, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(id: &str, match_text: &str) -> PlaceholderDescriptor {
        PlaceholderDescriptor {
            id: id.to_string(),
            label: id.to_string(),
            match_text: match_text.to_string(),
            value: String::new(),
            is_filled: false,
            field_type: PlaceholderType::Text,
            prompt: Some("Who signs?".to_string()),
            validation_note: None,
        }
    }

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        conn
    }

    #[test]
    fn insert_and_fetch_round_trip() {
        let conn = test_conn();
        let placeholders = vec![descriptor("a_0", "By:"), descriptor("b_1", "_____")];
        insert_document(&conn, "doc1", "lease.docx", "By: _____", "s/doc1.docx", &placeholders)
            .unwrap();

        let detail = get_document(&conn, "doc1").unwrap().unwrap();
        assert_eq!(detail.summary.title, "lease");
        assert_eq!(detail.summary.status, DocumentStatus::Draft);
        assert_eq!(detail.summary.total_placeholders, 2);
        assert_eq!(detail.placeholders.len(), 2);
        // Detection order is preserved.
        assert_eq!(detail.placeholders[0].id, "a_0");
        assert_eq!(detail.placeholders[0].prompt.as_deref(), Some("Who signs?"));
    }

    #[test]
    fn save_values_updates_counts_and_status() {
        let conn = test_conn();
        let placeholders = vec![descriptor("a_0", "By:"), descriptor("b_1", "_____")];
        insert_document(&conn, "doc1", "lease.docx", "text", "p", &placeholders).unwrap();

        let values = vec![PlaceholderValue { id: "a_0".to_string(), value: "Jane".to_string() }];
        let (filled, total) = save_values(&conn, "doc1", &values).unwrap();
        assert_eq!((filled, total), (1, 2));

        let detail = get_document(&conn, "doc1").unwrap().unwrap();
        assert_eq!(detail.summary.status, DocumentStatus::InProgress);
        assert_eq!(detail.summary.filled_placeholders, 1);
        assert!(detail.placeholders[0].is_filled);
    }

    #[test]
    fn soft_delete_hides_the_document() {
        let conn = test_conn();
        insert_document(&conn, "doc1", "lease.docx", "text", "p", &[]).unwrap();

        let paths = soft_delete(&conn, "doc1").unwrap();
        assert_eq!(paths, Some((Some("p".to_string()), None)));

        assert!(get_document(&conn, "doc1").unwrap().is_none());
        assert!(list_documents(&conn).unwrap().is_empty());
        // Second delete finds nothing.
        assert!(soft_delete(&conn, "doc1").unwrap().is_none());
    }

    #[test]
    fn mark_completed_sets_status_and_path() {
        let conn = test_conn();
        insert_document(&conn, "doc1", "lease.docx", "text", "p", &[]).unwrap();
        mark_completed(&conn, "doc1", "p_filled").unwrap();

        let detail = get_document(&conn, "doc1").unwrap().unwrap();
        assert_eq!(detail.summary.status, DocumentStatus::Completed);
    }
}
