use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::FeedbackError;

pub const FEEDBACK_KEY_PREFIX: &str = "feedback:";
pub const STATUS_SAVED: &str = "saved";

/// Body of a `POST /` submission.
#[derive(Debug, Default)]
pub struct FeedbackSubmission {
    pub text: Option<String>,
}

impl FeedbackSubmission {
    /// Read a submission from a decoded request body.
    ///
    /// Only `text` is looked at. A body that is not an object, or an object
    /// without `text` (or with `text: null`), is a submission without text.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is the JSON literal `null` or `text` is
    /// present but not a string.
    pub fn from_body(body: &Value) -> Result<Self, FeedbackError> {
        if body.is_null() {
            return Err(FeedbackError::ParseError(
                "Request body is null".to_string(),
            ));
        }

        let text = match body.get("text") {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(text.clone()),
            Some(other) => {
                return Err(FeedbackError::ParseError(format!(
                    "`text` must be a string, got {other}"
                )));
            }
        };

        Ok(Self { text })
    }

    /// Trimmed text, or `None` when the field is missing, null or blank.
    #[must_use]
    pub fn trimmed_text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// A stored piece of feedback. The key only has millisecond resolution, so two
/// submissions in the same millisecond share it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackRecord {
    pub key: String,
    pub text: String,
}

impl FeedbackRecord {
    #[must_use]
    pub fn new(text: &str, received_at: DateTime<Utc>) -> Self {
        Self {
            key: feedback_key(received_at),
            text: text.to_string(),
        }
    }
}

#[must_use]
pub fn feedback_key(received_at: DateTime<Utc>) -> String {
    format!("{FEEDBACK_KEY_PREFIX}{}", received_at.timestamp_millis())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

/// Typed view over a decoded model reply.
///
/// Every field is optional and read leniently: a field with an unexpected
/// type or an out-of-range enum value is simply absent here, while the
/// response still carries the decoded object untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub themes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
}

impl AnalysisResult {
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let field = |name: &str| value.get(name).cloned();

        Self {
            summary: value
                .get("summary")
                .and_then(Value::as_str)
                .map(ToString::to_string),
            sentiment: field("sentiment").and_then(|v| serde_json::from_value(v).ok()),
            themes: field("themes").and_then(|v| serde_json::from_value(v).ok()),
            urgency: field("urgency").and_then(|v| serde_json::from_value(v).ok()),
        }
    }
}

/// The 200 body returned for a stored submission.
#[derive(Debug, Serialize)]
pub struct SubmissionReceipt {
    pub status: &'static str,
    pub key: String,
    pub stored: bool,
    pub raw: Value,
    pub parsed: Option<Value>,
}

impl SubmissionReceipt {
    #[must_use]
    pub fn saved(key: String, raw: Value, parsed: Option<Value>) -> Self {
        Self {
            status: STATUS_SAVED,
            key,
            stored: true,
            raw,
            parsed,
        }
    }
}
