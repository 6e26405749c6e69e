use feedback_lens::api::{FeedbackIntake, handler};
use feedback_lens::core::config::AppConfig;
use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    feedback_lens::setup_logging();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;
    let intake = FeedbackIntake::from_config(&config).await;
    let intake = &intake;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handler(intake, event).await
    }))
    .await
}
