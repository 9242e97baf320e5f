//! Component state for the fill assistant.

use common::model::session::DocumentSession;
use yew::prelude::*;

/// Main state container for the [`AssistantComponent`].
///
/// Fields are `pub` because they are accessed by the `view` and `update`
/// modules.
pub struct AssistantComponent {
    /// The active document, or `None` before the first successful upload.
    pub session: Option<DocumentSession>,
    /// Raw bytes of the uploaded file, kept for the formatting-preserving
    /// binary export.
    pub original_binary: Option<Vec<u8>>,
    /// Current content of the answer input.
    pub input_value: String,
    /// An upload/detection round-trip is in flight.
    pub processing: bool,
    /// User-facing error from the last failed upload, if any.
    pub error: Option<String>,
    /// Validation errors from the last blocked export attempt.
    pub validation_errors: Vec<String>,
    /// An export round-trip is in flight.
    pub exporting: bool,
    /// Monotonic upload generation. Every new upload bumps it; async results
    /// carrying a stale generation are dropped in `update`, so a response
    /// that resolves after a reset or a second upload cannot clobber state.
    pub upload_seq: u32,
    /// Reference to the hidden file input.
    pub file_input_ref: NodeRef,
}

impl AssistantComponent {
    pub fn new() -> Self {
        Self {
            session: None,
            original_binary: None,
            input_value: String::new(),
            processing: false,
            error: None,
            validation_errors: Vec::new(),
            exporting: false,
            upload_seq: 0,
            file_input_ref: Default::default(),
        }
    }

    /// Pre-populates the input from the active descriptor, so revisiting a
    /// filled placeholder starts in edit mode with its current value.
    pub fn sync_input_to_current(&mut self) {
        self.input_value = self
            .session
            .as_ref()
            .and_then(|s| s.current())
            .map(|p| p.value.clone())
            .unwrap_or_default();
    }
}
