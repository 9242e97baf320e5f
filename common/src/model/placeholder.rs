use serde::{Deserialize, Serialize};

/// One fillable field detected in an uploaded document.
///
/// `match_text` is the exact substring the detector found in the source text
/// (a bracketed phrase, an underscore run, or a trailing-colon label). The
/// substitution engines locate occurrences of `match_text` and replace them
/// with the formatted `value`. Several descriptors may carry the same
/// `match_text` when the pattern repeats in the document; occurrences are
/// then assigned positionally, in descriptor order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceholderDescriptor {
    /// Stable within a document, derived from the label and detection index.
    pub id: String,
    /// Human-readable name shown in the placeholder list.
    pub label: String,
    /// Exact text to find in the source text and document body markup.
    pub match_text: String,
    /// Current fill value; an empty string means unfilled.
    #[serde(default)]
    pub value: String,
    /// Derived: true iff `value` trimmed is non-empty.
    #[serde(default)]
    pub is_filled: bool,
    /// Governs the input widget, formatting, and validation rule.
    #[serde(default)]
    pub field_type: PlaceholderType,
    /// Conversational question to ask the user, if the detector produced one.
    #[serde(default)]
    pub prompt: Option<String>,
    /// Free-text validation hint from the detector.
    #[serde(default)]
    pub validation_note: Option<String>,
}

impl PlaceholderDescriptor {
    /// Replaces the fill value and recomputes the derived `is_filled` flag.
    pub fn set_value(&mut self, value: String) {
        self.is_filled = !value.trim().is_empty();
        self.value = value;
    }
}

/// Deserialization goes through [`PlaceholderType::parse`] so an unknown or
/// missing type from the detector degrades to `Text` instead of failing the
/// whole descriptor list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum PlaceholderType {
    #[default]
    Text,
    Currency,
    Date,
    Email,
    Address,
    Phone,
    Number,
}

impl From<String> for PlaceholderType {
    fn from(raw: String) -> Self {
        PlaceholderType::parse(&raw)
    }
}

impl PlaceholderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceholderType::Text => "text",
            PlaceholderType::Currency => "currency",
            PlaceholderType::Date => "date",
            PlaceholderType::Email => "email",
            PlaceholderType::Address => "address",
            PlaceholderType::Phone => "phone",
            PlaceholderType::Number => "number",
        }
    }

    /// Parses the wire/database representation, defaulting unknown values
    /// to `Text` the same way deserialization does.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "currency" => PlaceholderType::Currency,
            "date" => PlaceholderType::Date,
            "email" => PlaceholderType::Email,
            "address" => PlaceholderType::Address,
            "phone" => PlaceholderType::Phone,
            "number" => PlaceholderType::Number,
            _ => PlaceholderType::Text,
        }
    }
}
