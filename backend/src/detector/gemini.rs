use async_trait::async_trait;
use common::model::placeholder::{PlaceholderDescriptor, PlaceholderType};
use log::{debug, info};
use regex::Regex;
use serde::Deserialize;
use serde_json::json;

use super::{DetectionError, PlaceholderDetector};

/// Placeholder detector backed by the Gemini generateContent API.
pub struct GeminiDetector {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

/// One entry of the JSON array the model is asked to return. Every field is
/// defaulted: the response carries no guaranteed schema, so missing fields
/// must not fail deserialization of the whole array.
#[derive(Debug, Deserialize)]
struct DetectedField {
    #[serde(default)]
    placeholder: String,
    #[serde(default)]
    label: String,
    #[serde(default, rename = "type")]
    field_type: String,
    #[serde(default)]
    prompt: Option<String>,
    #[serde(default)]
    validation: Option<String>,
}

impl GeminiDetector {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model,
        }
    }

    /// Build the request body for the Gemini generateContent API.
    fn build_request_body(document_text: &str) -> serde_json::Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": detection_prompt(document_text) }],
            }],
            "generationConfig": {
                "temperature": 0.1,
                "maxOutputTokens": 8192,
            },
        })
    }

    /// Pulls the JSON array out of the model's reply and maps it onto
    /// descriptors. Entries without a match text or a label are dropped;
    /// unknown types fall back to `text`.
    fn parse_descriptors(raw: &str) -> Result<Vec<PlaceholderDescriptor>, DetectionError> {
        // The model is asked for bare JSON but may still wrap it in prose or
        // a code fence; take the outermost array.
        let array_re = Regex::new(r"(?s)\[.*\]")
            .map_err(|e| DetectionError::Malformed(e.to_string()))?;
        let json_slice = array_re
            .find(raw)
            .ok_or_else(|| DetectionError::Malformed("no JSON array in response".to_string()))?
            .as_str();

        let fields: Vec<DetectedField> = serde_json::from_str(json_slice)
            .map_err(|e| DetectionError::Malformed(e.to_string()))?;

        let descriptors = fields
            .into_iter()
            .filter(|f| !f.placeholder.is_empty() && !f.label.is_empty())
            .enumerate()
            .map(|(index, f)| PlaceholderDescriptor {
                id: format!("{}_{}", f.label.to_lowercase().replace(' ', "_"), index),
                label: f.label,
                match_text: f.placeholder,
                value: String::new(),
                is_filled: false,
                field_type: PlaceholderType::parse(&f.field_type),
                prompt: f.prompt.filter(|p| !p.is_empty()),
                validation_note: f.validation.filter(|v| !v.is_empty()),
            })
            .collect();

        Ok(descriptors)
    }
}

#[async_trait]
impl PlaceholderDetector for GeminiDetector {
    async fn detect(
        &self,
        document_text: &str,
    ) -> Result<Vec<PlaceholderDescriptor>, DetectionError> {
        if self.api_key.is_empty() {
            return Err(DetectionError::NotConfigured(
                "set GEMINI_API_KEY to enable placeholder detection".to_string(),
            ));
        }

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key,
        );
        let body = Self::build_request_body(document_text);

        debug!("Detection request to model={}", self.model);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            if status == 429 || body.contains("quota") || body.contains("RESOURCE_EXHAUSTED") {
                return Err(DetectionError::Quota);
            }
            return Err(DetectionError::Api { status, body });
        }

        let resp: serde_json::Value = response.json().await?;
        let text = resp["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                DetectionError::Malformed(
                    "missing candidates[0].content.parts[0].text".to_string(),
                )
            })?;

        let descriptors = Self::parse_descriptors(text)?;
        info!("Detected {} placeholders", descriptors.len());
        Ok(descriptors)
    }
}

/// The pattern catalogue the model scans for. Only empty fields count:
/// a label that already has content after it is not a placeholder.
fn detection_prompt(document_text: &str) -> String {
    format!(
        r#"You are analyzing a legal document to find ALL EMPTY placeholders that need user input.
ONLY detect EMPTY/UNFILLED placeholders. SKIP any fields that already contain filled data.

Document:
"""
{document_text}
"""

Recognize these patterns:
1. Text in brackets: [any text here]
2. Dollar signs with underscores: $[____] (a currency placeholder)
3. Multiple underscores: _____ or ___________
4. Label with underscores: SomeWord: _____ (the underscores are the placeholder, NOT the label)
5. Label ending with a colon followed by blank lines or significant whitespace,
   e.g. "By:" or "Name:" on its own line (the placeholder is the entire "Label:" including the colon)

SKIP already-filled fields such as "Name: John Smith" or "Date: 2025-01-01".
If the same pattern appears multiple times, create a separate entry for EACH occurrence,
using the surrounding context to give each a unique, descriptive label.

For each placeholder return:
{{
  "placeholder": "the exact text to find/replace",
  "label": "unique descriptive name based on context",
  "type": "text, currency, date, email, address, phone, or number",
  "prompt": "conversational question to ask the user",
  "validation": ""
}}

Return ONLY a valid JSON array. NO markdown, NO explanations."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_structure() {
        let body = GeminiDetector::build_request_body("Name: _____");

        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 1);
        assert_eq!(contents[0]["role"], "user");
        let prompt = contents[0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("Name: _____"));
        assert!(body["generationConfig"]["maxOutputTokens"].is_number());
    }

    #[test]
    fn parses_a_clean_array() {
        let raw = r#"[
            {"placeholder": "By:", "label": "Company Signature", "type": "text",
             "prompt": "Who is signing for the company?", "validation": ""},
            {"placeholder": "$[____]", "label": "Monthly Rent", "type": "currency"}
        ]"#;
        let descriptors = GeminiDetector::parse_descriptors(raw).unwrap();
        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0].match_text, "By:");
        assert_eq!(descriptors[0].id, "company_signature_0");
        assert_eq!(descriptors[1].field_type, PlaceholderType::Currency);
        assert!(descriptors[1].prompt.is_none());
    }

    #[test]
    fn tolerates_surrounding_prose_and_fences() {
        let raw = "Here you go:\n```json\n[{\"placeholder\": \"_____\", \"label\": \"Date\", \"type\": \"date\"}]\n```";
        let descriptors = GeminiDetector::parse_descriptors(raw).unwrap();
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].field_type, PlaceholderType::Date);
    }

    #[test]
    fn drops_entries_missing_required_fields() {
        let raw = r#"[
            {"label": "No Match Text"},
            {"placeholder": "_____"},
            {"placeholder": "[Name]", "label": "Client Name"}
        ]"#;
        let descriptors = GeminiDetector::parse_descriptors(raw).unwrap();
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].label, "Client Name");
    }

    #[test]
    fn unknown_type_defaults_to_text() {
        let raw = r#"[{"placeholder": "_____", "label": "X", "type": "surprise"}]"#;
        let descriptors = GeminiDetector::parse_descriptors(raw).unwrap();
        assert_eq!(descriptors[0].field_type, PlaceholderType::Text);
    }

    #[test]
    fn non_json_response_is_malformed() {
        let err = GeminiDetector::parse_descriptors("I could not find any placeholders.")
            .unwrap_err();
        assert!(matches!(err, DetectionError::Malformed(_)));
    }
}
