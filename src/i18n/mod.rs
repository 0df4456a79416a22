//! Internationalization (i18n) for the bilingual site.
//!
//! # Architecture
//!
//! - `language`: the `Lang` enum and `LocalizedText` pairs
//! - `resolver`: request language resolution and `/en` path rewriting
//! - `preference`: client-side language switching and theme preference
//! - `strings`: localized messages emitted by the API
//!
//! # Example
//!
//! ```rust,ignore
//! use portfolio_server::i18n::{resolver, Lang};
//!
//! assert_eq!(resolver::current_lang("/en/projects"), Lang::En);
//! assert_eq!(resolver::to_japanese_path("/en/projects"), "/projects");
//! ```

mod language;
pub mod preference;
pub mod resolver;
mod strings;

pub use language::{Lang, LangError, LocalizedText};
pub use resolver::{RedirectPolicy, Resolution};
pub use strings::LanguageStrings;
