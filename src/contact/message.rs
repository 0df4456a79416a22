use crate::contact::submission::ContactSubmission;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const NOTIFICATION_TITLE: &str = "新しいお問い合わせ";
pub const NAME_FIELD_LABEL: &str = "お名前";
pub const EMAIL_FIELD_LABEL: &str = "メールアドレス";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Structured notice delivered to the site owner for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationMessage {
    pub title: String,
    pub body: String,
    pub fields: Vec<NotificationField>,
    pub timestamp: DateTime<Utc>,
}

impl NotificationMessage {
    /// Build the notice for a validated submission received at `received_at`.
    pub fn from_submission(submission: &ContactSubmission, received_at: DateTime<Utc>) -> Self {
        Self {
            title: NOTIFICATION_TITLE.to_string(),
            body: submission.message.clone(),
            fields: vec![
                NotificationField {
                    name: NAME_FIELD_LABEL.to_string(),
                    value: submission.name.clone(),
                    inline: true,
                },
                NotificationField {
                    name: EMAIL_FIELD_LABEL.to_string(),
                    value: submission.email.clone(),
                    inline: true,
                },
            ],
            timestamp: received_at,
        }
    }
}
