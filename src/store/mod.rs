//! Durable key-value storage for submitted feedback.

pub mod ssm;

use async_trait::async_trait;

use crate::errors::FeedbackError;

pub use ssm::SsmKvStore;

/// Write-only key-value store. Feedback is never read back through it.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Store `value` under `key`, replacing any existing value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store rejects the write.
    async fn put(&self, key: &str, value: &str) -> Result<(), FeedbackError>;
}
