use async_trait::async_trait;
use aws_sdk_ssm::{Client as SsmClient, types::ParameterType};
use tracing::{debug, error};

use super::KvStore;
use crate::core::config::AppConfig;
use crate::errors::FeedbackError;

/// SSM parameter names allow `[a-zA-Z0-9_.-/]`, so the `:` separating a key's
/// namespace from its id becomes a path separator.
fn parameter_name(prefix: &str, key: &str) -> String {
    let mut p = prefix.to_string();
    if !p.ends_with('/') {
        p.push('/');
    }
    format!("{p}{}", key.replace(':', "/"))
}

/// [`KvStore`] backed by AWS Systems Manager Parameter Store.
pub struct SsmKvStore {
    client: SsmClient,
    prefix: String,
}

impl SsmKvStore {
    #[must_use]
    pub fn new(client: SsmClient, prefix: String) -> Self {
        Self { client, prefix }
    }

    /// Build a store from the ambient AWS configuration chain.
    pub async fn from_config(config: &AppConfig) -> Self {
        let shared = aws_config::from_env().load().await;
        Self::new(SsmClient::new(&shared), config.feedback_param_prefix.clone())
    }
}

#[async_trait]
impl KvStore for SsmKvStore {
    async fn put(&self, key: &str, value: &str) -> Result<(), FeedbackError> {
        let name = parameter_name(&self.prefix, key);
        debug!(parameter = %name, "Writing feedback parameter");

        self.client
            .put_parameter()
            .name(&name)
            .value(value)
            .r#type(ParameterType::String)
            .overwrite(true)
            .send()
            .await
            .map_err(|e| {
                error!(parameter = %name, "ssm put_parameter failed: {:?}", e);
                FeedbackError::StoreError(format!("ssm put_parameter {name}: {e}"))
            })?;

        Ok(())
    }
}
