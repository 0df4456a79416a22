//! Language type and localized text values.
//!
//! The site is served in exactly two languages. Japanese is the canonical
//! language: it lives at unprefixed paths and is the fallback whenever a
//! request carries no usable preference.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a language code is not one of the supported codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown language code: '{0}'")]
pub struct LangError(pub String);

/// A supported site language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    /// Japanese, served at unprefixed paths.
    #[default]
    Ja,
    /// English, served under the `/en` prefix.
    En,
}

impl Lang {
    /// All supported languages, canonical first.
    pub const ALL: [Lang; 2] = [Lang::Ja, Lang::En];

    /// Parse a language code such as `"ja"` or `"EN"`.
    ///
    /// # Returns
    /// * `Ok(Lang)` for `ja`/`en` in any letter case (surrounding whitespace ignored)
    /// * `Err(LangError)` for anything else
    pub fn from_code(code: &str) -> Result<Lang, LangError> {
        match code.trim().to_ascii_lowercase().as_str() {
            "ja" => Ok(Lang::Ja),
            "en" => Ok(Lang::En),
            _ => Err(LangError(code.to_string())),
        }
    }

    /// The canonical (fallback) language.
    pub fn canonical() -> Lang {
        Lang::Ja
    }

    /// ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            Lang::Ja => "ja",
            Lang::En => "en",
        }
    }

    /// Label shown in the language switcher, written in the language itself.
    pub fn native_name(&self) -> &'static str {
        match self {
            Lang::Ja => "日本語",
            Lang::En => "English",
        }
    }

    /// Short badge shown next to the switcher option.
    pub fn badge(&self) -> &'static str {
        match self {
            Lang::Ja => "JA",
            Lang::En => "EN",
        }
    }

    pub fn is_canonical(&self) -> bool {
        *self == Lang::canonical()
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Lang {
    type Err = LangError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Lang::from_code(s)
    }
}

/// A string authored in both languages.
///
/// Values are built into the binary as constants and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocalizedText {
    pub ja: &'static str,
    pub en: &'static str,
}

impl LocalizedText {
    pub const fn new(ja: &'static str, en: &'static str) -> Self {
        Self { ja, en }
    }

    /// Same text for both languages (proper nouns, product names).
    pub const fn same(text: &'static str) -> Self {
        Self { ja: text, en: text }
    }

    pub fn get(&self, lang: Lang) -> &'static str {
        match lang {
            Lang::Ja => self.ja,
            Lang::En => self.en,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_japanese() {
        assert_eq!(Lang::from_code("ja").unwrap(), Lang::Ja);
    }

    #[test]
    fn test_from_code_english() {
        assert_eq!(Lang::from_code("en").unwrap(), Lang::En);
    }

    #[test]
    fn test_from_code_is_case_insensitive() {
        assert_eq!(Lang::from_code("EN").unwrap(), Lang::En);
        assert_eq!(Lang::from_code(" Ja ").unwrap(), Lang::Ja);
    }

    #[test]
    fn test_from_code_invalid() {
        let result = Lang::from_code("fr");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown"));
    }

    #[test]
    fn test_from_code_empty() {
        assert!(Lang::from_code("").is_err());
    }

    #[test]
    fn test_from_str_matches_from_code() {
        let lang: Lang = "en".parse().unwrap();
        assert_eq!(lang, Lang::En);
    }

    // ==================== Canonical Tests ====================

    #[test]
    fn test_canonical_is_japanese() {
        assert_eq!(Lang::canonical(), Lang::Ja);
        assert_eq!(Lang::default(), Lang::Ja);
        assert!(Lang::Ja.is_canonical());
        assert!(!Lang::En.is_canonical());
    }

    #[test]
    fn test_display_uses_code() {
        assert_eq!(Lang::Ja.to_string(), "ja");
        assert_eq!(Lang::En.to_string(), "en");
    }

    #[test]
    fn test_native_names() {
        assert_eq!(Lang::Ja.native_name(), "日本語");
        assert_eq!(Lang::En.native_name(), "English");
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Lang::En).unwrap(), "\"en\"");
        let lang: Lang = serde_json::from_str("\"ja\"").unwrap();
        assert_eq!(lang, Lang::Ja);
    }

    // ==================== LocalizedText Tests ====================

    #[test]
    fn test_localized_text_get() {
        let text = LocalizedText::new("こんにちは", "Hello");
        assert_eq!(text.get(Lang::Ja), "こんにちは");
        assert_eq!(text.get(Lang::En), "Hello");
    }

    #[test]
    fn test_localized_text_same() {
        let text = LocalizedText::same("Rust");
        assert_eq!(text.get(Lang::Ja), text.get(Lang::En));
    }
}
