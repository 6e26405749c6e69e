use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("Failed to parse request: {0}")]
    ParseError(String),

    #[error("Failed to write to key-value store: {0}")]
    StoreError(String),

    #[error("Failed to access inference service: {0}")]
    InferenceError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl From<reqwest::Error> for FeedbackError {
    fn from(error: reqwest::Error) -> Self {
        FeedbackError::HttpError(error.to_string())
    }
}

impl From<serde_json::Error> for FeedbackError {
    fn from(error: serde_json::Error) -> Self {
        FeedbackError::ParseError(error.to_string())
    }
}
