//! API error taxonomy.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Field-level validation messages keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a `{field: [messages]}` error body; `None` unless it is a JSON object
    pub fn from_body(body: &Value) -> Option<Self> {
        let fields = body.as_object()?;
        let mut errors = Self::new();
        for (field, messages) in fields {
            for message in flatten_messages(messages) {
                errors.insert(field.clone(), message);
            }
        }
        Some(errors)
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `field: msg1, msg2; other: msg3`
    pub fn joined(&self) -> String {
        self.0
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

fn flatten_messages(value: &Value) -> Vec<String> {
    match value {
        Value::String(message) => vec![message.clone()],
        Value::Array(items) => items.iter().flat_map(flatten_messages).collect(),
        Value::Null => Vec::new(),
        other => vec![other.to_string()],
    }
}

/// Failure of a single API call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// No response was received
    #[error("request failed: {0}")]
    Transport(String),

    #[error("resource not found")]
    NotFound,

    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    #[error("HTTP error (status {status})")]
    Http { status: u16, body: Option<Value> },

    /// 2xx with a body we could not read
    #[error("unexpected response: {0}")]
    Decode(String),

    /// Request could not be built; nothing was sent
    #[error("invalid request: {0}")]
    InvalidPayload(String),
}

impl ApiError {
    /// Classify a non-2xx response
    pub fn from_response(status: u16, body: &str) -> Self {
        let body: Option<Value> = serde_json::from_str(body).ok();
        match status {
            404 => ApiError::NotFound,
            400 | 422 => match body.as_ref().and_then(FieldErrors::from_body) {
                Some(fields) if !fields.is_empty() => ApiError::Validation(fields),
                _ => ApiError::Http { status, body },
            },
            _ => ApiError::Http { status, body },
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_body_is_classified() {
        let err = ApiError::from_response(
            400,
            r#"{"original_file": ["No file was submitted."], "email": ["Enter a valid email address.", "Too long."]}"#,
        );
        let ApiError::Validation(fields) = err else {
            panic!("expected validation error, got {:?}", err);
        };
        assert_eq!(
            fields.joined(),
            "email: Enter a valid email address., Too long.; original_file: No file was submitted."
        );
    }

    #[test]
    fn test_not_found() {
        assert_eq!(ApiError::from_response(404, r#"{"detail": "Not found."}"#), ApiError::NotFound);
    }

    #[test]
    fn test_other_statuses_keep_body() {
        let err = ApiError::from_response(500, "<html>oops</html>");
        assert_eq!(err, ApiError::Http { status: 500, body: None });

        let err = ApiError::from_response(400, r#"["bad"]"#);
        assert!(matches!(err, ApiError::Http { status: 400, body: Some(_) }));
    }

    #[test]
    fn test_nested_messages_are_flattened() {
        let body: Value = serde_json::from_str(r#"{"non_field_errors": [["a"], "b"], "x": null}"#).unwrap();
        let fields = FieldErrors::from_body(&body).unwrap();
        assert_eq!(fields.joined(), "non_field_errors: a, b");
    }
}
