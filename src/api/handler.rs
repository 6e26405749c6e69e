//! API Lambda handler - thin adapter between the proxy event and the intake.

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};
use uuid::Uuid;

use super::intake::FeedbackIntake;
use super::request::HttpRequest;

pub use self::function_handler as handler;

/// Lambda handler for the API entrypoint.
///
/// # Errors
///
/// Returns an error if the event cannot be read as an HTTP request, the body
/// of a `POST` is malformed, or a collaborator fails. The runtime reports
/// these as a failed invocation.
#[tracing::instrument(
    level = "info",
    skip(intake, event),
    fields(correlation_id = %Uuid::new_v4(), request_id = %event.context.request_id)
)]
pub async fn function_handler(
    intake: &FeedbackIntake,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    let request = HttpRequest::from_event(&event.payload).map_err(|e| {
        error!("Request decode error: {}", e);
        Error::from(e)
    })?;
    info!(method = %request.method, path = %request.path, "API Lambda received request");

    intake.handle(&request).await.map_err(|e| {
        error!("Request failed: {}", e);
        Error::from(e)
    })
}
