//! Gemini `generateContent` payload types.

use crate::models::EncodedPart;
use serde::{Deserialize, Serialize};

/// Request body for `generateContent`. No generation config is sent, so the
/// model's own output limit applies.
#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

/// Gemini content container used in both requests and responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Untagged union of text and inline media content parts.
///
/// Variant order matters for `#[serde(untagged)]` decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

/// Base64 inline payload carrying an uploaded document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

impl From<&EncodedPart> for Part {
    fn from(part: &EncodedPart) -> Self {
        Part::InlineData {
            inline_data: InlineData {
                mime_type: part.mime_type.clone(),
                data: part.base64_data.clone(),
            },
        }
    }
}

/// Top-level `generateContent` response envelope.
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// Finish reason of a candidate that ran to its natural end.
pub const FINISH_STOP: &str = "STOP";

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
    #[serde(rename = "finishReason", default)]
    pub finish_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Why the first candidate stopped, when it stopped for anything other
    /// than [`FINISH_STOP`] (`MAX_TOKENS`, `SAFETY`, `RECITATION`, ...).
    /// A missing finish reason is treated as a normal stop.
    pub fn abnormal_finish(&self) -> Option<&str> {
        self.candidates
            .first()?
            .finish_reason
            .as_deref()
            .filter(|reason| *reason != FINISH_STOP)
    }

    /// Joins every text part of the first candidate.
    pub fn first_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| match p {
                Part::Text { text } => Some(text.as_str()),
                Part::InlineData { .. } => None,
            })
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_part_serializes_camel_case() {
        let part = Part::from(&EncodedPart {
            mime_type: "application/pdf".to_string(),
            base64_data: "JVBERi0=".to_string(),
        });
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "inlineData": { "mimeType": "application/pdf", "data": "JVBERi0=" }
            })
        );
    }

    #[test]
    fn test_first_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "**Mục tiêu**\n" }, { "text": "- Hiểu bài" }] }
            }]
        }))
        .unwrap();
        assert_eq!(
            response.first_text().as_deref(),
            Some("**Mục tiêu**\n- Hiểu bài")
        );
    }

    #[test]
    fn test_first_text_none_for_blank_or_missing_content() {
        let blank: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "  " }] } }]
        }))
        .unwrap();
        assert!(blank.first_text().is_none());

        let blocked: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        }))
        .unwrap();
        assert!(blocked.first_text().is_none());

        let empty: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(empty.first_text().is_none());
    }

    #[test]
    fn test_abnormal_finish() {
        let truncated: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "**1. Mục tiêu**" }] },
                "finishReason": "MAX_TOKENS"
            }]
        }))
        .unwrap();
        assert_eq!(truncated.abnormal_finish(), Some("MAX_TOKENS"));

        let stopped: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "plan" }] },
                "finishReason": "STOP"
            }]
        }))
        .unwrap();
        assert_eq!(stopped.abnormal_finish(), None);

        let unspecified: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "plan" }] } }]
        }))
        .unwrap();
        assert_eq!(unspecified.abnormal_finish(), None);
    }
}
