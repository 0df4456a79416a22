use crate::i18n::Lang;

/// All localized user-facing strings produced by the server.
///
/// Page copy lives with the content catalog; this table covers messages the
/// API itself emits (form validation, delivery failures, notification text).
#[derive(Debug, Clone)]
pub struct LanguageStrings {
    // ==================== Contact Validation ====================
    /// Shown when the name field is missing or blank
    pub name_required: &'static str,

    /// Shown when the email field is missing
    pub email_required: &'static str,

    /// Shown when the email field is not a valid address
    pub email_invalid: &'static str,

    /// Shown when the message field is missing
    pub message_required: &'static str,

    /// Shown when the message is shorter than the minimum
    pub message_too_short: &'static str,

    /// Shown when the message is longer than the maximum
    pub message_too_long: &'static str,

    /// Summary line for a rejected submission
    pub validation_failed: &'static str,

    // ==================== Contact Delivery ====================
    /// Generic failure shown when the notification could not be sent
    pub delivery_failed: &'static str,

    /// Generic failure shown when the server is misconfigured
    pub service_unavailable: &'static str,

    // ==================== Content ====================
    /// Shown when a project id does not exist
    pub project_not_found: &'static str,
}

impl LanguageStrings {
    pub fn for_lang(lang: Lang) -> &'static LanguageStrings {
        match lang {
            Lang::Ja => &JAPANESE_STRINGS,
            Lang::En => &ENGLISH_STRINGS,
        }
    }
}

// ==================== Japanese Strings ====================

/// Japanese strings (canonical)
pub const JAPANESE_STRINGS: LanguageStrings = LanguageStrings {
    name_required: "お名前を入力してください",
    email_required: "メールアドレスを入力してください",
    email_invalid: "有効なメールアドレスを入力してください",
    message_required: "お問い合わせ内容を入力してください",
    message_too_short: "メッセージは少なくとも10文字である必要があります",
    message_too_long: "メッセージは最大1000文字までです",
    validation_failed: "入力内容に誤りがあります",

    delivery_failed: "送信に失敗しました。時間をおいて再度お試しください。",
    service_unavailable: "現在お問い合わせを受け付けられません。時間をおいて再度お試しください。",

    project_not_found: "プロジェクトが見つかりません",
};

// ==================== English Strings ====================

pub const ENGLISH_STRINGS: LanguageStrings = LanguageStrings {
    name_required: "Please enter your name",
    email_required: "Please enter your email address",
    email_invalid: "Please enter a valid email address",
    message_required: "Please enter a message",
    message_too_short: "Message must be at least 10 characters",
    message_too_long: "Message must be at most 1000 characters",
    validation_failed: "Some fields are invalid",

    delivery_failed: "Failed to send your message. Please try again later.",
    service_unavailable: "The contact form is currently unavailable. Please try again later.",

    project_not_found: "Project not found",
};
