//! Notification sink capability.
//!
//! The pipeline only knows this trait; Discord is one implementation and
//! tests inject their own.

use crate::config::ConfigError;
use crate::contact::message::NotificationMessage;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

impl SinkError {
    /// Transport failures, timeouts, rate limits and server errors may
    /// succeed on a second attempt; other API errors will not.
    pub fn is_retryable(&self) -> bool {
        match self {
            SinkError::Transport(_) | SinkError::Timeout(_) => true,
            SinkError::Api { status, .. } => *status == 429 || *status >= 500,
        }
    }
}

/// Delivers a notification to an external channel.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send(&self, message: &NotificationMessage) -> Result<(), SinkError>;
}

/// Supplies the sink for a submission, failing when it is not configured.
pub trait SinkProvider: Send + Sync {
    fn sink(&self) -> Result<Arc<dyn NotificationSink>, ConfigError>;
}

/// Provider that always hands out the same sink.
pub struct FixedSinkProvider(pub Arc<dyn NotificationSink>);

impl SinkProvider for FixedSinkProvider {
    fn sink(&self) -> Result<Arc<dyn NotificationSink>, ConfigError> {
        Ok(Arc::clone(&self.0))
    }
}
