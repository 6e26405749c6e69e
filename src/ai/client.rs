//! Inference service client.
//!
//! The intake handler only sees the [`InferenceService`] trait; the hosted
//! Workers AI REST endpoint is the production implementation.

use async_trait::async_trait;
use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};
use reqwest::Client;
use serde_json::{Value, json};
use tracing::info;
use url::Url;

use crate::core::config::AppConfig;
use crate::errors::FeedbackError;

/// A single synchronous call to a hosted language model.
#[async_trait]
pub trait InferenceService: Send + Sync {
    /// Run `model` over `messages` and return the service's reply verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is unreachable or reports a failure.
    async fn run(
        &self,
        model: &str,
        messages: &[ChatCompletionMessage],
    ) -> Result<Value, FeedbackError>;
}

fn role_str(role: &MessageRole) -> &'static str {
    match role {
        MessageRole::system => "system",
        MessageRole::user => "user",
        MessageRole::assistant => "assistant",
        MessageRole::function => "function",
        MessageRole::tool => "tool",
    }
}

/// Flatten chat messages into the `{role, content}` list the REST API takes.
/// Image parts are not supported and are skipped.
#[must_use]
pub fn build_messages_body(messages: &[ChatCompletionMessage]) -> Vec<Value> {
    messages
        .iter()
        .filter_map(|msg| match &msg.content {
            Content::Text(text) => Some(json!({
                "role": role_str(&msg.role),
                "content": text
            })),
            Content::ImageUrl(_) => None,
        })
        .collect()
}

/// Workers AI over its public REST API.
pub struct WorkersAiClient {
    http: Client,
    base_url: String,
    account_id: String,
    api_token: String,
}

impl WorkersAiClient {
    #[must_use]
    pub fn new(base_url: String, account_id: String, api_token: String) -> Self {
        Self {
            http: Client::new(),
            base_url,
            account_id,
            api_token,
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.ai_base_url.clone(),
            config.cf_account_id.clone(),
            config.cf_api_token.clone(),
        )
    }

    /// # Errors
    ///
    /// Returns an error if the base URL and model do not form a valid URL.
    pub fn run_url(&self, model: &str) -> Result<Url, FeedbackError> {
        let base = self.base_url.trim_end_matches('/');
        let raw = format!("{base}/accounts/{}/ai/run/{model}", self.account_id);
        Url::parse(&raw).map_err(|e| FeedbackError::ConfigError(format!("{raw}: {e}")))
    }
}

/// Pull the model reply out of the REST envelope
/// (`{"result": ..., "success": ..., "errors": [...]}`).
///
/// # Errors
///
/// Returns an error if the envelope reports `success: false`.
pub fn unwrap_envelope(envelope: Value) -> Result<Value, FeedbackError> {
    if envelope.get("success").and_then(Value::as_bool) == Some(false) {
        let errors = envelope
            .get("errors")
            .map(ToString::to_string)
            .unwrap_or_else(|| "[]".to_string());
        return Err(FeedbackError::InferenceError(format!(
            "Workers AI reported failure: {errors}"
        )));
    }

    match envelope {
        Value::Object(mut map) => Ok(map.remove("result").unwrap_or(Value::Object(map))),
        other => Ok(other),
    }
}

#[async_trait]
impl InferenceService for WorkersAiClient {
    async fn run(
        &self,
        model: &str,
        messages: &[ChatCompletionMessage],
    ) -> Result<Value, FeedbackError> {
        let url = self.run_url(model)?;

        #[cfg(feature = "debug-logs")]
        info!("Using analysis prompt:\n{:?}", messages);

        info!(model = %model, messages = messages.len(), "Calling inference service");

        let request_body = json!({ "messages": build_messages_body(messages) });

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_token)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| FeedbackError::HttpError(format!("Workers AI request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(FeedbackError::InferenceError(format!(
                "Workers AI returned {status}: {error_text}"
            )));
        }

        let envelope: Value = response.json().await.map_err(|e| {
            FeedbackError::InferenceError(format!("Failed to parse Workers AI response: {e}"))
        })?;

        unwrap_envelope(envelope)
    }
}
