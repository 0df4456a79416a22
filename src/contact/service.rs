//! Validate-then-notify orchestration for contact submissions.

use crate::config::Config;
use crate::contact::message::NotificationMessage;
use crate::contact::sink::{SinkError, SinkProvider};
use crate::contact::submission::{validate, FieldErrors, RawSubmission};
use crate::i18n::{Lang, LanguageStrings};
use crate::retry::{with_retry_if, RetryConfig};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info, warn};

/// Why a submission did not go through.
///
/// Configuration and delivery failures carry no cause. The cause is logged
/// where it happens and never handed back to the caller.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("submission rejected: {0}")]
    Rejected(FieldErrors),

    #[error("contact notifications are not configured")]
    Configuration,

    #[error("notification delivery failed")]
    Delivery,
}

impl SubmissionError {
    /// Single user-facing line for the response body. For a rejection this
    /// is the first field error.
    pub fn user_message(&self, lang: Lang) -> &'static str {
        let strings = LanguageStrings::for_lang(lang);
        match self {
            SubmissionError::Rejected(errors) => errors
                .iter()
                .next()
                .map(|e| e.message(lang))
                .unwrap_or(strings.validation_failed),
            SubmissionError::Configuration => strings.service_unavailable,
            SubmissionError::Delivery => strings.delivery_failed,
        }
    }
}

pub struct ContactService {
    provider: Arc<dyn SinkProvider>,
    timeout: Duration,
    retry: RetryConfig,
}

impl ContactService {
    pub fn new(provider: Arc<dyn SinkProvider>, timeout: Duration, retry: RetryConfig) -> Self {
        Self {
            provider,
            timeout,
            retry,
        }
    }

    /// Service using the delivery settings from `config`.
    pub fn from_config(provider: Arc<dyn SinkProvider>, config: &Config) -> Self {
        Self::new(
            provider,
            config.notify_timeout,
            RetryConfig::notification(config.notify_max_attempts),
        )
    }

    pub async fn submit(&self, raw: RawSubmission) -> Result<(), SubmissionError> {
        self.submit_at(raw, Utc::now()).await
    }

    /// Run the pipeline with an explicit submission time.
    pub async fn submit_at(
        &self,
        raw: RawSubmission,
        received_at: DateTime<Utc>,
    ) -> Result<(), SubmissionError> {
        let submission = validate(&raw).map_err(|errors| {
            info!("Contact submission rejected: {}", errors);
            SubmissionError::Rejected(errors)
        })?;

        let sink = self.provider.sink().map_err(|e| {
            error!("Contact sink unavailable: {}", e);
            SubmissionError::Configuration
        })?;

        let message = NotificationMessage::from_submission(&submission, received_at);
        let timeout = self.timeout;

        with_retry_if(
            &self.retry,
            "Contact notification",
            || {
                let sink = Arc::clone(&sink);
                let message = &message;
                async move {
                    match tokio::time::timeout(timeout, sink.send(message)).await {
                        Ok(result) => result,
                        Err(_) => Err(SinkError::Timeout(timeout)),
                    }
                }
            },
            SinkError::is_retryable,
        )
        .await
        .map_err(|e| {
            warn!("Contact notification failed: {}", e);
            SubmissionError::Delivery
        })?;

        info!("Contact submission forwarded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::contact::sink::{FixedSinkProvider, NotificationSink};
    use crate::contact::submission::{Field, FieldErrorKind};
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    // ==================== Test Doubles ====================

    /// Records messages; fails the first `failures` calls with `error`.
    struct SpySink {
        calls: AtomicU32,
        failures: u32,
        error: fn() -> SinkError,
        delay: Duration,
        sent: Mutex<Vec<NotificationMessage>>,
    }

    impl SpySink {
        fn ok() -> Arc<Self> {
            Self::failing(0, || SinkError::Transport(String::new()))
        }

        fn failing(failures: u32, error: fn() -> SinkError) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicU32::new(0),
                failures,
                error,
                delay: Duration::ZERO,
                sent: Mutex::new(Vec::new()),
            })
        }

        fn slow(delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicU32::new(0),
                failures: 0,
                error: || SinkError::Transport(String::new()),
                delay,
                sent: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl NotificationSink for SpySink {
        async fn send(&self, message: &NotificationMessage) -> Result<(), SinkError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            if n < self.failures {
                return Err((self.error)());
            }
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    struct MissingConfigProvider;

    impl SinkProvider for MissingConfigProvider {
        fn sink(&self) -> Result<Arc<dyn NotificationSink>, ConfigError> {
            Err(ConfigError::MissingSetting("DISCORD_CHANNEL_ID"))
        }
    }

    fn service(sink: Arc<SpySink>, max_attempts: u32) -> ContactService {
        ContactService::new(
            Arc::new(FixedSinkProvider(sink)),
            Duration::from_secs(5),
            RetryConfig::new(max_attempts, Duration::from_millis(1)),
        )
    }

    fn valid_raw() -> RawSubmission {
        RawSubmission {
            name: Some("  Tanaka ".to_string()),
            email: Some("A@B.COM".to_string()),
            message: Some("x".repeat(10)),
        }
    }

    // ==================== Success Path ====================

    #[tokio::test]
    async fn test_submit_forwards_normalized_message() {
        let sink = SpySink::ok();
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();

        service(sink.clone(), 2)
            .submit_at(valid_raw(), at)
            .await
            .expect("Should succeed");

        assert_eq!(sink.calls(), 1);
        let sent = sink.sent.lock().unwrap();
        assert_eq!(sent[0].body, "x".repeat(10));
        assert_eq!(sent[0].fields[0].value, "Tanaka");
        assert_eq!(sent[0].fields[1].value, "a@b.com");
        assert_eq!(sent[0].timestamp, at);
    }

    // ==================== Rejected Path ====================

    #[tokio::test]
    async fn test_missing_email_never_reaches_sink() {
        let sink = SpySink::ok();
        let raw = RawSubmission {
            email: None,
            ..valid_raw()
        };

        let err = service(sink.clone(), 2).submit(raw).await.unwrap_err();

        match err {
            SubmissionError::Rejected(errors) => {
                assert_eq!(
                    errors.first(Field::Email).map(|e| e.kind),
                    Some(FieldErrorKind::Required)
                );
            }
            other => panic!("Expected rejection, got {:?}", other),
        }
        assert_eq!(sink.calls(), 0);
    }

    #[tokio::test]
    async fn test_rejection_checked_before_configuration() {
        let service = ContactService::new(
            Arc::new(MissingConfigProvider),
            Duration::from_secs(1),
            RetryConfig::new(1, Duration::from_millis(1)),
        );
        let err = service.submit(RawSubmission::default()).await.unwrap_err();
        assert!(matches!(err, SubmissionError::Rejected(_)));
    }

    // ==================== Failed Path ====================

    #[tokio::test]
    async fn test_missing_configuration_fails_without_sink() {
        let service = ContactService::new(
            Arc::new(MissingConfigProvider),
            Duration::from_secs(1),
            RetryConfig::new(1, Duration::from_millis(1)),
        );
        let err = service.submit(valid_raw()).await.unwrap_err();
        assert!(matches!(err, SubmissionError::Configuration));
        assert!(!err.to_string().contains("DISCORD_CHANNEL_ID"));
    }

    #[tokio::test]
    async fn test_sink_failure_is_generic() {
        let sink = SpySink::failing(u32::MAX, || SinkError::Api {
            status: 401,
            body: "secret internal detail".to_string(),
        });

        let err = service(sink.clone(), 2).submit(valid_raw()).await.unwrap_err();

        assert!(matches!(err, SubmissionError::Delivery));
        assert!(!format!("{:?}", err).contains("secret internal detail"));
        assert!(!err.user_message(Lang::Ja).contains("secret internal detail"));
        assert_eq!(
            err.user_message(Lang::Ja),
            "送信に失敗しました。時間をおいて再度お試しください。"
        );
        // 401 is not retryable
        assert_eq!(sink.calls(), 1);
    }

    #[tokio::test]
    async fn test_retryable_failure_retried_once() {
        let sink = SpySink::failing(1, || SinkError::Api {
            status: 502,
            body: String::new(),
        });

        service(sink.clone(), 2)
            .submit(valid_raw())
            .await
            .expect("Second attempt should succeed");
        assert_eq!(sink.calls(), 2);
    }

    #[tokio::test]
    async fn test_retries_are_bounded() {
        let sink = SpySink::failing(u32::MAX, || SinkError::Transport("reset".to_string()));
        let err = service(sink.clone(), 2).submit(valid_raw()).await.unwrap_err();
        assert!(matches!(err, SubmissionError::Delivery));
        assert_eq!(sink.calls(), 2);
    }

    #[tokio::test]
    async fn test_hanging_sink_times_out() {
        let sink = SpySink::slow(Duration::from_secs(30));
        let service = ContactService::new(
            Arc::new(FixedSinkProvider(sink.clone())),
            Duration::from_millis(20),
            RetryConfig::new(1, Duration::from_millis(1)),
        );

        let err = service.submit(valid_raw()).await.unwrap_err();
        assert!(matches!(err, SubmissionError::Delivery));
        assert_eq!(sink.calls(), 1);
    }

    #[test]
    fn test_user_messages_localized() {
        assert_eq!(
            SubmissionError::Delivery.user_message(Lang::En),
            "Failed to send your message. Please try again later."
        );
        assert_ne!(
            SubmissionError::Configuration.user_message(Lang::Ja),
            SubmissionError::Configuration.user_message(Lang::En)
        );
    }
}
