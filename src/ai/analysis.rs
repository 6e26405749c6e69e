//! Normalization of inference replies.
//!
//! Hosted models do not agree on where the generated text lives, so the
//! reply is treated as an open JSON value and probed field by field.

use serde_json::Value;
use tracing::{debug, warn};

/// Candidate fields carrying generated text, highest priority first.
pub const RESPONSE_TEXT_FIELDS: [&str; 3] = ["response", "result", "output"];

/// Return the first candidate field that is present and not `null`,
/// together with its name.
///
/// The value is returned whatever its type; a non-string winner still
/// shadows lower-priority fields.
#[must_use]
pub fn extract_response_text(raw: &Value) -> Option<(&'static str, &Value)> {
    RESPONSE_TEXT_FIELDS
        .iter()
        .find_map(|&field| match raw.get(field) {
            Some(Value::Null) | None => None,
            Some(value) => Some((field, value)),
        })
}

/// Decode the model's textual payload.
///
/// Whatever the text decodes to is returned as-is; the instruction asks for
/// an object but the reply is not held to it. Returns `None` if the payload
/// is absent, not a string, not valid JSON, or the JSON literal `null`.
#[must_use]
pub fn parse_analysis(payload: Option<&Value>) -> Option<Value> {
    let text = payload?.as_str()?;

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Null) => None,
        Ok(value) => {
            if !value.is_object() {
                debug!("Model reply decoded to a non-object value");
            }
            Some(value)
        }
        Err(e) => {
            warn!(error = %e, "Model reply is not valid JSON");
            None
        }
    }
}
