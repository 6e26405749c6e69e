//! Feedback intake: store the submission, ask the model for an analysis,
//! and report both back to the caller.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{error, info};

use super::helpers;
use super::request::HttpRequest;
use crate::ai::{InferenceService, WorkersAiClient, build_analysis_prompt};
use crate::ai::{extract_response_text, parse_analysis};
use crate::core::config::AppConfig;
use crate::core::models::{AnalysisResult, FeedbackRecord, FeedbackSubmission, SubmissionReceipt};
use crate::errors::FeedbackError;
use crate::store::{KvStore, SsmKvStore};
use crate::views::INDEX_HTML;

pub const MISSING_TEXT_MESSAGE: &str = "Missing text";

/// The intake handler with its two collaborators.
pub struct FeedbackIntake {
    store: Box<dyn KvStore>,
    inference: Box<dyn InferenceService>,
    model: String,
}

impl FeedbackIntake {
    #[must_use]
    pub fn new(
        store: Box<dyn KvStore>,
        inference: Box<dyn InferenceService>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            store,
            inference,
            model: model.into(),
        }
    }

    /// Wire up the SSM store and the Workers AI client from configuration.
    pub async fn from_config(config: &AppConfig) -> Self {
        let store = SsmKvStore::from_config(config).await;
        let inference = WorkersAiClient::from_config(config);
        Self::new(Box::new(store), Box::new(inference), config.ai_model.clone())
    }

    /// Dispatch on method: `POST` submits feedback, anything else gets the page.
    ///
    /// # Errors
    ///
    /// Propagates malformed bodies and collaborator failures from [`Self::submit`].
    pub async fn handle(&self, request: &HttpRequest) -> Result<Value, FeedbackError> {
        if request.is_post() {
            return self.submit(request.body.as_deref()).await;
        }

        info!(method = %request.method, path = %request.path, "Serving intake page");
        Ok(helpers::ok_html(INDEX_HTML))
    }

    /// # Errors
    ///
    /// See [`Self::submit_at`].
    pub async fn submit(&self, body: Option<&str>) -> Result<Value, FeedbackError> {
        self.submit_at(body, Utc::now()).await
    }

    /// Run the intake pipeline for a submission received at `received_at`.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is missing, not valid JSON, the literal
    /// `null`, or carries a non-string `text`; if the store write fails; or
    /// if the inference call fails. An unparseable model reply is not an
    /// error.
    pub async fn submit_at(
        &self,
        body: Option<&str>,
        received_at: DateTime<Utc>,
    ) -> Result<Value, FeedbackError> {
        let body = body.ok_or_else(|| FeedbackError::ParseError("Missing body".to_string()))?;
        let body: Value = serde_json::from_str(body)?;
        let submission = FeedbackSubmission::from_body(&body)?;

        let Some(text) = submission.trimmed_text() else {
            info!("Rejecting submission without text");
            return Ok(helpers::err_response(400, MISSING_TEXT_MESSAGE));
        };

        let record = FeedbackRecord::new(text, received_at);

        self.store
            .put(&record.key, &record.text)
            .await
            .inspect_err(|e| error!(key = %record.key, "Failed to store feedback: {}", e))?;

        info!(key = %record.key, chars = record.text.chars().count(), "Stored feedback");

        let prompt = build_analysis_prompt(&record.text);
        let raw = self
            .inference
            .run(&self.model, &prompt)
            .await
            .inspect_err(|e| error!(key = %record.key, "Inference call failed: {}", e))?;

        let payload = extract_response_text(&raw);
        let parsed = parse_analysis(payload.map(|(_, value)| value));

        match &parsed {
            Some(value) => {
                let analysis = AnalysisResult::from_value(value);
                info!(
                    key = %record.key,
                    field = payload.map(|(field, _)| field).unwrap_or("none"),
                    sentiment = ?analysis.sentiment,
                    urgency = ?analysis.urgency,
                    themes = analysis.themes.as_ref().map_or(0, Vec::len),
                    "Parsed analysis"
                );
            }
            None => info!(
                key = %record.key,
                field = payload.map(|(field, _)| field).unwrap_or("none"),
                "No parseable analysis in model reply"
            ),
        }

        let receipt = SubmissionReceipt::saved(record.key, raw, parsed);
        Ok(helpers::ok_json_pretty(&receipt)?)
    }
}
