//! Contact form pipeline: validate the submission, format a notification
//! and hand it to a [`NotificationSink`].
//!
//! ```text
//! Received -> Validating -> Rejected
//!                        -> Notifying -> Succeeded
//!                                     -> Failed
//! ```

pub mod discord;
pub mod message;
pub mod service;
pub mod sink;
pub mod submission;

pub use discord::{DiscordNotifier, DiscordSinkProvider};
pub use message::{NotificationField, NotificationMessage};
pub use service::{ContactService, SubmissionError};
pub use sink::{FixedSinkProvider, NotificationSink, SinkError, SinkProvider};
pub use submission::{validate, ContactSubmission, Field, FieldErrors, RawSubmission};
