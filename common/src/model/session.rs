use crate::model::placeholder::PlaceholderDescriptor;

/// The single active document being filled.
///
/// Owned by the UI layer and passed around explicitly; there is exactly one
/// writer, and a new upload replaces the whole session. Descriptors are never
/// removed, only their `value`/`is_filled` mutate, so `current_index` stays
/// valid for the lifetime of the session.
#[derive(Debug, Clone)]
pub struct DocumentSession {
    /// Set once the backend persisted the upload; `None` in local-only mode.
    pub document_id: Option<String>,
    pub file_name: String,
    /// Extracted plain text, immutable once set.
    pub original_text: String,
    /// Detection order, which is also the UI order.
    pub placeholders: Vec<PlaceholderDescriptor>,
    /// Index of the descriptor currently holding input focus.
    pub current_index: usize,
    /// Whether the backend accepted the document and placeholder rows.
    pub saved: bool,
}

impl DocumentSession {
    pub fn new(
        file_name: String,
        original_text: String,
        placeholders: Vec<PlaceholderDescriptor>,
    ) -> Self {
        Self {
            document_id: None,
            file_name,
            original_text,
            placeholders,
            current_index: 0,
            saved: false,
        }
    }

    pub fn current(&self) -> Option<&PlaceholderDescriptor> {
        self.placeholders.get(self.current_index)
    }

    pub fn filled_count(&self) -> usize {
        self.placeholders.iter().filter(|p| p.is_filled).count()
    }

    /// Export becomes available (not automatic) once every descriptor holds a
    /// non-empty value.
    pub fn all_filled(&self) -> bool {
        !self.placeholders.is_empty() && self.placeholders.iter().all(|p| p.is_filled)
    }

    /// Stores a value for the active descriptor and advances the cursor.
    ///
    /// Empty submissions are ignored. After a successful submit the cursor
    /// moves to the first still-unfilled descriptor with a larger index; if
    /// there is none it moves to `current + 1` when that exists, otherwise it
    /// stays put.
    pub fn submit_value(&mut self, value: &str) -> bool {
        if value.trim().is_empty() {
            return false;
        }
        let Some(active) = self.placeholders.get_mut(self.current_index) else {
            return false;
        };
        active.set_value(value.to_string());

        let next_unfilled = self
            .placeholders
            .iter()
            .enumerate()
            .find(|(i, p)| *i > self.current_index && !p.is_filled)
            .map(|(i, _)| i);

        if let Some(i) = next_unfilled {
            self.current_index = i;
        } else if self.current_index + 1 < self.placeholders.len() {
            self.current_index += 1;
        }
        true
    }

    /// Jumps the cursor to descriptor `index`. Selecting an already-filled
    /// descriptor is how the UI enters edit mode; the store only moves focus.
    pub fn select(&mut self, index: usize) {
        if index < self.placeholders.len() {
            self.current_index = index;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::placeholder::{PlaceholderDescriptor, PlaceholderType};

    fn descriptor(id: &str) -> PlaceholderDescriptor {
        PlaceholderDescriptor {
            id: id.to_string(),
            label: id.to_string(),
            match_text: "_____".to_string(),
            value: String::new(),
            is_filled: false,
            field_type: PlaceholderType::Text,
            prompt: None,
            validation_note: None,
        }
    }

    fn session(count: usize) -> DocumentSession {
        let placeholders = (0..count).map(|i| descriptor(&format!("p{i}"))).collect();
        DocumentSession::new("test.docx".into(), "text".into(), placeholders)
    }

    #[test]
    fn submit_advances_to_next_unfilled() {
        let mut s = session(3);
        assert!(s.submit_value("first"));
        assert_eq!(s.current_index, 1);
        assert!(s.placeholders[0].is_filled);
    }

    #[test]
    fn submit_skips_filled_descriptors() {
        let mut s = session(4);
        s.placeholders[1].set_value("already".into());
        assert!(s.submit_value("first"));
        assert_eq!(s.current_index, 2);
    }

    #[test]
    fn submit_from_middle_does_not_wrap() {
        // [Filled, Unfilled, Unfilled] with the cursor at 1: submitting must
        // advance to 2, not back to 0.
        let mut s = session(3);
        s.placeholders[0].set_value("done".into());
        s.select(1);
        assert!(s.submit_value("middle"));
        assert_eq!(s.current_index, 2);
    }

    #[test]
    fn cursor_stays_on_last_descriptor() {
        let mut s = session(2);
        s.select(1);
        assert!(s.submit_value("last"));
        assert_eq!(s.current_index, 1);
    }

    #[test]
    fn empty_submission_is_ignored() {
        let mut s = session(2);
        assert!(!s.submit_value("   "));
        assert_eq!(s.current_index, 0);
        assert!(!s.placeholders[0].is_filled);
    }

    #[test]
    fn editing_a_filled_descriptor_keeps_it_filled() {
        let mut s = session(2);
        assert!(s.submit_value("old"));
        s.select(0);
        assert!(s.submit_value("new"));
        assert_eq!(s.placeholders[0].value, "new");
        // index 1 is the next unfilled descriptor
        assert_eq!(s.current_index, 1);
    }

    #[test]
    fn all_filled_gates_export() {
        let mut s = session(2);
        assert!(!s.all_filled());
        s.submit_value("a");
        s.submit_value("b");
        assert!(s.all_filled());
    }
}
