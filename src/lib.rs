//! Feedback Lens - turns a piece of free-text customer feedback into a
//! product-manager readout.
//!
//! A single API Lambda serves an intake page on `GET` and accepts
//! submissions on `POST`. Each submission is:
//! 1. stored in SSM Parameter Store under a `feedback:<epoch-millis>` key
//! 2. sent to a hosted Llama model with a fixed instruction prompt
//! 3. returned with the raw model reply and, when it decodes, the parsed
//!    analysis (summary, sentiment, themes, urgency)
//!
//! # Architecture
//!
//! The system uses:
//! - AWS Lambda (function URL or API Gateway proxy events)
//! - SSM Parameter Store as a write-only key-value store
//! - Workers AI over its REST API for inference
//! - Tokio for async runtime
//!
//! The store and the model sit behind the [`store::KvStore`] and
//! [`ai::InferenceService`] traits so the intake can be driven with fakes.
//!
//! # Example
//!
//! ```no_run
//! use feedback_lens::api::FeedbackIntake;
//! use feedback_lens::core::config::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     feedback_lens::setup_logging();
//!
//!     let config = AppConfig {
//!         cf_account_id: "dummy_account".to_string(),
//!         cf_api_token: "dummy_token".to_string(),
//!         ai_model: feedback_lens::ai::DEFAULT_MODEL.to_string(),
//!         ai_base_url: "https://api.cloudflare.com/client/v4".to_string(),
//!         feedback_param_prefix: "/feedback-lens/".to_string(),
//!     };
//!
//!     let intake = FeedbackIntake::from_config(&config).await;
//!     let response = intake
//!         .submit(Some(r#"{"text": "Billing page is impossible to find"}"#))
//!         .await?;
//!     println!("{}", response["body"]);
//!
//!     Ok(())
//! }
//! ```

pub mod ai;
pub mod api;
pub mod core;
pub mod errors;
pub mod store;
pub mod views;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. It should be called once at cold start.
///
/// # Example
///
/// ```
/// feedback_lens::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}
