//! Contact form validation.
//!
//! Turns untrusted form fields into a [`ContactSubmission`] or a collection
//! of per-field errors. Nothing in here performs I/O.

use crate::i18n::{Lang, LanguageStrings};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

pub const MESSAGE_MIN_CHARS: usize = 10;
pub const MESSAGE_MAX_CHARS: usize = 1000;

/// Form fields exactly as received. Any of them may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A submission that passed validation, with normalized values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Message,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    Required,
    InvalidEmail,
    TooShort { min: usize },
    TooLong { max: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub kind: FieldErrorKind,
}

impl FieldError {
    fn new(field: Field, kind: FieldErrorKind) -> Self {
        Self { field, kind }
    }

    /// Message shown next to the field.
    pub fn message(&self, lang: Lang) -> &'static str {
        let strings = LanguageStrings::for_lang(lang);
        match (self.field, self.kind) {
            (Field::Name, FieldErrorKind::Required) => strings.name_required,
            (Field::Email, FieldErrorKind::Required) => strings.email_required,
            (Field::Message, FieldErrorKind::Required) => strings.message_required,
            (_, FieldErrorKind::InvalidEmail) => strings.email_invalid,
            (_, FieldErrorKind::TooShort { .. }) => strings.message_too_short,
            (_, FieldErrorKind::TooLong { .. }) => strings.message_too_long,
        }
    }
}

/// Every validation failure for one submission, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    fn push(&mut self, field: Field, kind: FieldErrorKind) {
        self.0.push(FieldError::new(field, kind));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// First error recorded for `field`.
    pub fn first(&self, field: Field) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }

    /// First message per field, for the response body.
    pub fn messages(&self, lang: Lang) -> BTreeMap<Field, &'static str> {
        let mut messages = BTreeMap::new();
        for error in &self.0 {
            messages.entry(error.field).or_insert_with(|| error.message(lang));
        }
        messages
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<String> = self.0.iter().map(|e| e.field.to_string()).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

/// Validate and normalize a raw submission.
///
/// - `name`: trimmed, must be non-empty
/// - `email`: lower-cased, must look like an email address
/// - `message`: trimmed, 10 to 1000 characters inclusive
///
/// Blank fields are reported as missing.
pub fn validate(raw: &RawSubmission) -> Result<ContactSubmission, FieldErrors> {
    let mut errors = FieldErrors::default();

    let name = raw.name.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        errors.push(Field::Name, FieldErrorKind::Required);
    }

    let email = raw
        .email
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_default();
    if email.trim().is_empty() {
        errors.push(Field::Email, FieldErrorKind::Required);
    } else if !is_valid_email(&email) {
        errors.push(Field::Email, FieldErrorKind::InvalidEmail);
    }

    let message = raw.message.as_deref().map(str::trim).unwrap_or_default();
    let length = message.chars().count();
    if message.is_empty() {
        errors.push(Field::Message, FieldErrorKind::Required);
    } else if length < MESSAGE_MIN_CHARS {
        errors.push(
            Field::Message,
            FieldErrorKind::TooShort {
                min: MESSAGE_MIN_CHARS,
            },
        );
    } else if length > MESSAGE_MAX_CHARS {
        errors.push(
            Field::Message,
            FieldErrorKind::TooLong {
                max: MESSAGE_MAX_CHARS,
            },
        );
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ContactSubmission {
        name: name.to_string(),
        email,
        message: message.to_string(),
    })
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[a-z0-9_'+\-.]*[a-z0-9_+\-]@([a-z0-9][a-z0-9\-]*\.)+[a-z]{2,}$")
            .expect("email pattern is valid")
    })
}

/// Syntax check for an already lower-cased address.
///
/// The local part may not start with a dot or contain consecutive dots.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, _)) = email.split_once('@') else {
        return false;
    };
    !local.starts_with('.') && !email.contains("..") && email_regex().is_match(email)
}
