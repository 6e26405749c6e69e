//! Proxy-integration response builders.

use serde::Serialize;
use serde_json::{Value, json};

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";

/// Returns a response with the given status, content type and raw body.
#[must_use]
pub fn response(status_code: u16, content_type: &str, body: String) -> Value {
    json!({
        "statusCode": status_code,
        "headers": { "Content-Type": content_type },
        "body": body
    })
}

/// Returns a JSON response whose body is `body` serialized with two-space
/// indentation, keeping the struct's field order.
pub fn ok_json_pretty<T: Serialize>(body: &T) -> Result<Value, serde_json::Error> {
    let rendered = serde_json::to_string_pretty(body)?;
    Ok(response(200, CONTENT_TYPE_JSON, rendered))
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    response(
        status_code,
        CONTENT_TYPE_JSON,
        json!({ "error": message }).to_string(),
    )
}

/// Returns a 200 HTML response.
#[must_use]
pub fn ok_html(html: &str) -> Value {
    response(200, CONTENT_TYPE_HTML, html.to_string())
}
