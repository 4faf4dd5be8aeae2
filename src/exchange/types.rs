//! `generateContent` payload types and answer extraction.

use crate::ExchangeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// User input that is non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Trim `input`, returning `None` when nothing is left.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Text extracted from the first part of the first candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer(pub String);

impl Answer {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// Single content holding a single text part.
    pub fn from_query(query: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(query.to_string()),
                }],
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Content {
    pub parts: Vec<Part>,
}

/// Content part. Non-text parts (inline media) decode with `text: None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Content,
}

/// Navigate `candidates[0].content.parts[0].text` in a raw response body.
///
/// Every decoding or navigation failure collapses into
/// [`ExchangeError::ParseFailure`]; the cause is only logged.
pub fn extract_answer(body: &str) -> Result<Answer, ExchangeError> {
    let response: GenerateContentResponse = serde_json::from_str(body).map_err(|e| {
        tracing::debug!("Failed to decode generateContent response: {}", e);
        ExchangeError::ParseFailure
    })?;

    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().next())
        .and_then(|p| p.text)
        .map(Answer)
        .ok_or_else(|| {
            tracing::debug!("generateContent response has no leading text part");
            ExchangeError::ParseFailure
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_query_parse_trims() {
        assert_eq!(Query::parse("  hello \n").unwrap().as_str(), "hello");
    }

    #[test]
    fn test_query_parse_rejects_blank() {
        assert!(Query::parse("").is_none());
        assert!(Query::parse(" \t\n").is_none());
    }

    #[test]
    fn test_request_serializes_nested_shape() {
        let body = serde_json::to_string(&GenerateContentRequest::from_query("Why is the sky blue?"))
            .unwrap();
        assert_eq!(
            body,
            r#"{"contents":[{"parts":[{"text":"Why is the sky blue?"}]}]}"#
        );
    }

    #[test]
    fn test_request_escapes_special_characters() {
        let query = "quote \" backslash \\ newline \n unicode é";
        let body = serde_json::to_string(&GenerateContentRequest::from_query(query)).unwrap();
        let decoded: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(decoded["contents"][0]["parts"][0]["text"], query);
    }

    #[test]
    fn test_extract_answer_success() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Hello there"}]}}]}"#;
        assert_eq!(extract_answer(body).unwrap(), Answer("Hello there".to_string()));
    }

    #[test]
    fn test_extract_answer_ignores_extra_fields_and_parts() {
        let body = r#"{
            "candidates": [
                {
                    "content": {
                        "role": "model",
                        "parts": [
                            { "text": "first" },
                            { "inlineData": { "mimeType": "image/png", "data": "AA==" } }
                        ]
                    },
                    "finishReason": "STOP"
                },
                { "content": { "parts": [{ "text": "second" }] } }
            ],
            "usageMetadata": { "totalTokenCount": 12 }
        }"#;
        assert_eq!(extract_answer(body).unwrap().as_str(), "first");
    }

    #[test]
    fn test_extract_answer_parse_failures() {
        let bodies = [
            "not json",
            "",
            r#"{"unexpected":"shape"}"#,
            r#"{"candidates":[]}"#,
            r#"{"candidates":{}}"#,
            r#"{"candidates":[{}]}"#,
            r#"{"candidates":[{"content":{"parts":[]}}]}"#,
            r#"{"candidates":[{"content":{"parts":[{"inlineData":{}}]}}]}"#,
            r#"{"candidates":[{"content":{"parts":[{"text":42}]}}]}"#,
            r#"[1,2,3]"#,
        ];

        for body in bodies {
            assert_eq!(
                extract_answer(body),
                Err(ExchangeError::ParseFailure),
                "body: {}",
                body
            );
        }
    }
}
