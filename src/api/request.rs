//! Extraction of the HTTP request carried by a Lambda proxy event.
//!
//! Function URLs and HTTP APIs (payload v2) put the method under
//! `requestContext.http.method`; REST APIs (payload v1) use `httpMethod`.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde_json::Value;

use crate::errors::FeedbackError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: String,
    pub path: String,
    pub body: Option<String>,
}

impl HttpRequest {
    /// # Errors
    ///
    /// Returns an error if a base64-encoded body cannot be decoded to UTF-8.
    pub fn from_event(payload: &Value) -> Result<Self, FeedbackError> {
        let method = v_str(payload, &["requestContext", "http", "method"])
            .or_else(|| v_str(payload, &["httpMethod"]))
            .unwrap_or("GET")
            .to_ascii_uppercase();

        let path = v_str(payload, &["rawPath"])
            .or_else(|| v_str(payload, &["path"]))
            .unwrap_or("/")
            .to_string();

        let is_base64 = payload
            .get("isBase64Encoded")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        let body = match payload.get("body").and_then(Value::as_str) {
            Some(raw) if is_base64 => Some(decode_base64_body(raw)?),
            Some(raw) => Some(raw.to_string()),
            None => None,
        };

        Ok(Self { method, path, body })
    }

    #[must_use]
    pub fn is_post(&self) -> bool {
        self.method == "POST"
    }
}

fn decode_base64_body(raw: &str) -> Result<String, FeedbackError> {
    let bytes = STANDARD
        .decode(raw)
        .map_err(|e| FeedbackError::ParseError(format!("Failed to decode body: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| FeedbackError::ParseError(format!("Body is not UTF-8: {e}")))
}

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

pub fn v_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    v_path(root, path).and_then(|v| v.as_str())
}
