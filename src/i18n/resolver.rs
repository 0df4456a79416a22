//! Request language resolution.
//!
//! Decides which language variant a request is served in and whether the
//! visitor should be redirected between the unprefixed (Japanese) and `/en`
//! (English) trees. Everything here is pure except [`language_middleware`],
//! which wires the decision into the axum request pipeline.

use crate::i18n::preference::lang_cookie;
use crate::i18n::Lang;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::str::FromStr;
use tracing::debug;

/// Cookie holding the visitor's explicit language choice.
pub const LANG_COOKIE: &str = "lang";

const EN_PREFIX: &str = "/en";

/// Which paths are eligible for a preference redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedirectPolicy {
    /// Only the bare root `/`.
    #[default]
    RootOnly,
    /// `/`, `/en` and `/en/`.
    RootLike,
}

impl RedirectPolicy {
    pub fn applies_to(&self, path: &str) -> bool {
        match self {
            RedirectPolicy::RootOnly => path == "/",
            RedirectPolicy::RootLike => matches!(path, "/" | "/en" | "/en/"),
        }
    }
}

impl FromStr for RedirectPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "root" | "root-only" => Ok(RedirectPolicy::RootOnly),
            "root-like" | "rootlike" => Ok(RedirectPolicy::RootLike),
            other => Err(format!("Unknown redirect policy: '{}'", other)),
        }
    }
}

/// `true` when the path sits in the English tree (`/en` as a full segment).
pub fn is_english_path(path: &str) -> bool {
    path == EN_PREFIX || path.starts_with("/en/")
}

/// The language the URL itself says, independent of any preference.
pub fn current_lang(path: &str) -> Lang {
    if is_english_path(path) {
        Lang::En
    } else {
        Lang::Ja
    }
}

/// Add the `/en` prefix unless the path already carries it.
pub fn to_english_path(path: &str) -> String {
    if is_english_path(path) {
        return path.to_string();
    }
    let rest = if path == "/" { "" } else { path };
    format!("{}{}", EN_PREFIX, rest)
}

/// Strip a leading `/en` segment; an empty result becomes `/`.
pub fn to_japanese_path(path: &str) -> String {
    let stripped = match path.strip_prefix(EN_PREFIX) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => path,
    };
    if stripped.is_empty() {
        "/".to_string()
    } else {
        stripped.to_string()
    }
}

/// Rewrite `path` for `lang` and re-attach the query string unchanged.
///
/// `query` is the raw query without the leading `?`.
pub fn build_language_path(lang: Lang, path: &str, query: Option<&str>) -> String {
    let base = if lang.is_canonical() {
        to_japanese_path(path)
    } else {
        to_english_path(path)
    };
    format!("{}{}", base, format_query(query))
}

fn format_query(query: Option<&str>) -> String {
    match query {
        Some(q) if !q.is_empty() => format!("?{}", q),
        _ => String::new(),
    }
}

/// Parse an `Accept-Language` header into a language.
///
/// Any tag starting with `ja` wins regardless of its position or weight;
/// otherwise English. A missing header, or one with no usable tags, falls
/// back to Japanese.
pub fn parse_accept_language(header: Option<&str>) -> Lang {
    let Some(header) = header else {
        return Lang::canonical();
    };

    let tags: Vec<String> = header
        .split(',')
        .filter_map(|entry| entry.split(';').next())
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect();

    if tags.is_empty() {
        return Lang::canonical();
    }

    if tags.iter().any(|tag| tag.starts_with("ja")) {
        Lang::Ja
    } else {
        Lang::En
    }
}

/// Stored preference first, then the header.
pub fn preferred_lang(stored: Option<Lang>, accept_language: Option<&str>) -> Lang {
    stored.unwrap_or_else(|| parse_accept_language(accept_language))
}

/// Extract a valid `lang` cookie value from request headers.
///
/// Unknown values are ignored rather than rejected.
pub fn lang_from_cookies(headers: &HeaderMap) -> Option<Lang> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| name.trim() == LANG_COOKIE)
        .and_then(|(_, value)| Lang::from_code(value.trim()).ok())
}

/// Outcome of resolving one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Serve the request in this language.
    Serve(Lang),
    /// Send the visitor to this path (query included).
    Redirect(String),
}

/// Inputs needed to resolve one request.
#[derive(Debug, Clone, Copy)]
pub struct LanguageRequest<'a> {
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub stored: Option<Lang>,
    pub accept_language: Option<&'a str>,
}

/// Decide whether to serve or redirect.
pub fn resolve(request: &LanguageRequest<'_>, policy: RedirectPolicy) -> Resolution {
    let current = current_lang(request.path);

    if !policy.applies_to(request.path) {
        return Resolution::Serve(current);
    }

    let preferred = preferred_lang(request.stored, request.accept_language);
    if preferred == current {
        return Resolution::Serve(current);
    }

    let target = build_language_path(preferred, request.path, request.query);
    let current_url = format!("{}{}", request.path, format_query(request.query));
    if target != current_url {
        Resolution::Redirect(target)
    } else {
        Resolution::Serve(current)
    }
}

/// axum middleware: redirect when needed, otherwise attach the resolved
/// [`Lang`] to the request extensions for handlers.
///
/// A served page records its language in the `lang` cookie whenever the
/// stored choice differs, so the next visit to `/` follows the page the
/// visitor last read.
pub async fn language_middleware(
    State(policy): State<RedirectPolicy>,
    mut request: Request,
    next: Next,
) -> Response {
    let headers = request.headers();
    let accept_language = headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok());
    let stored = lang_from_cookies(headers);

    let uri = request.uri().clone();
    let resolution = resolve(
        &LanguageRequest {
            path: uri.path(),
            query: uri.query(),
            stored,
            accept_language,
        },
        policy,
    );

    match resolution {
        Resolution::Redirect(target) => {
            debug!("Redirecting {} to {}", uri, target);
            (StatusCode::FOUND, [(header::LOCATION, target)]).into_response()
        }
        Resolution::Serve(lang) => {
            request.extensions_mut().insert(lang);
            let mut response = next.run(request).await;
            if stored != Some(lang) {
                if let Ok(cookie) = HeaderValue::from_str(&lang_cookie(lang)) {
                    response.headers_mut().append(header::SET_COOKIE, cookie);
                }
            }
            response
        }
    }
}
