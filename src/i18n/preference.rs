//! Visitor preferences: language switching and color theme.
//!
//! Browser globals (cookies, local storage, `prefers-color-scheme`) are
//! modelled as an injected [`PreferenceStore`] so the switching rules can be
//! exercised without a browser.

use crate::i18n::resolver::{build_language_path, current_lang, LANG_COOKIE};
use crate::i18n::Lang;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// One year, matching the cookie lifetime set by the site.
pub const LANG_COOKIE_MAX_AGE: u32 = 60 * 60 * 24 * 365;

/// Storage key for the theme preference.
pub const THEME_KEY: &str = "theme";

/// `Set-Cookie` value persisting an explicit language choice.
pub fn lang_cookie(lang: Lang) -> String {
    format!(
        "{}={}; Path=/; Max-Age={}; SameSite=Lax",
        LANG_COOKIE,
        lang.code(),
        LANG_COOKIE_MAX_AGE
    )
}

/// What the operating system reports for `prefers-color-scheme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

/// Callback fired when the system color scheme changes.
pub type SystemChangeListener = Box<dyn Fn(ColorScheme) + Send + Sync>;

/// Key/value preference storage plus the system color-scheme signal.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str);

    /// Current system color scheme.
    fn system_scheme(&self) -> ColorScheme;

    fn subscribe_to_system_change(&self, listener: SystemChangeListener);
}

/// In-process [`PreferenceStore`].
#[derive(Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<HashMap<String, String>>,
    system: Mutex<ColorScheme>,
    listeners: Mutex<Vec<SystemChangeListener>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_system_scheme(scheme: ColorScheme) -> Self {
        let store = Self::default();
        *lock(&store.system) = scheme;
        store
    }

    /// Change the system scheme and notify subscribers.
    pub fn set_system_scheme(&self, scheme: ColorScheme) {
        *lock(&self.system) = scheme;
        for listener in lock(&self.listeners).iter() {
            listener(scheme);
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.values).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        lock(&self.values).insert(key.to_string(), value.to_string());
    }

    fn system_scheme(&self) -> ColorScheme {
        *lock(&self.system)
    }

    fn subscribe_to_system_change(&self, listener: SystemChangeListener) {
        lock(&self.listeners).push(listener);
    }
}

// A poisoned lock only means a listener panicked; the stored data is intact.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ==================== Language Switching ====================

/// The parts of the browser location that survive a language switch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub pathname: String,
    /// Query without the leading `?`.
    pub search: Option<String>,
    /// Fragment without the leading `#`.
    pub hash: Option<String>,
}

impl Location {
    pub fn new(pathname: &str) -> Self {
        Self {
            pathname: pathname.to_string(),
            ..Self::default()
        }
    }

    /// Split `path?query#hash`.
    pub fn parse(url: &str) -> Self {
        let (rest, hash) = match url.split_once('#') {
            Some((rest, hash)) => (rest, Some(hash.to_string())),
            None => (url, None),
        };
        let (pathname, search) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (rest, None),
        };
        let pathname = if pathname.is_empty() { "/" } else { pathname };
        Self {
            pathname: pathname.to_string(),
            search,
            hash,
        }
    }

    pub fn href(&self) -> String {
        let mut href = self.pathname.clone();
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            href.push('?');
            href.push_str(search);
        }
        if let Some(hash) = self.hash.as_deref().filter(|h| !h.is_empty()) {
            href.push('#');
            href.push_str(hash);
        }
        href
    }
}

/// URL for `target` keeping query and fragment.
pub fn language_url(target: Lang, location: &Location) -> String {
    let mut url = build_language_path(target, &location.pathname, location.search.as_deref());
    if let Some(hash) = location.hash.as_deref().filter(|h| !h.is_empty()) {
        url.push('#');
        url.push_str(hash);
    }
    url
}

/// Client-side language toggle.
pub struct LanguageSwitcher<S: PreferenceStore> {
    store: Arc<S>,
}

impl<S: PreferenceStore> LanguageSwitcher<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Language the current location is in.
    pub fn current(&self, location: &Location) -> Lang {
        current_lang(&location.pathname)
    }

    /// Record the language of a page the visitor landed on (e.g. after
    /// history navigation) so the next root visit honours it.
    pub fn sync_from_location(&self, location: &Location) -> Lang {
        let lang = self.current(location);
        self.store.set(LANG_COOKIE, lang.code());
        lang
    }

    /// Persist `target` and return the URL to navigate to, or `None` when
    /// the location already matches.
    pub fn switch(&self, target: Lang, location: &Location) -> Option<String> {
        let next = language_url(target, location);
        if next == location.href() {
            return None;
        }
        self.store.set(LANG_COOKIE, target.code());
        debug!("Switching language to {}: {}", target, next);
        Some(next)
    }

    /// The stored language choice, if any.
    pub fn stored(&self) -> Option<Lang> {
        self.store
            .get(LANG_COOKIE)
            .and_then(|code| Lang::from_code(&code).ok())
    }
}

// ==================== Theme ====================

/// Theme preference as chosen by the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::System];

    /// Value written to storage.
    pub fn storage_value(&self) -> &'static str {
        match self {
            Theme::Light => "theme-light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }

    pub fn from_storage(value: &str) -> Option<Theme> {
        match value {
            "theme-light" | "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            "system" => Some(Theme::System),
            _ => None,
        }
    }

    pub fn label(&self, lang: Lang) -> &'static str {
        match (self, lang) {
            (Theme::Light, Lang::Ja) => "ライトモード",
            (Theme::Dark, Lang::Ja) => "ダークモード",
            (Theme::System, Lang::Ja) => "システム設定",
            (Theme::Light, Lang::En) => "Light",
            (Theme::Dark, Lang::En) => "Dark",
            (Theme::System, Lang::En) => "System",
        }
    }
}

/// Reads, writes and resolves the theme preference.
pub struct ThemeController<S: PreferenceStore + 'static> {
    store: Arc<S>,
}

impl<S: PreferenceStore + 'static> ThemeController<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn preference(&self) -> Theme {
        Self::stored_theme(&self.store)
    }

    pub fn set(&self, theme: Theme) {
        self.store.set(THEME_KEY, theme.storage_value());
    }

    /// Scheme actually applied to the page.
    pub fn resolved(&self) -> ColorScheme {
        match self.preference() {
            Theme::Light => ColorScheme::Light,
            Theme::Dark => ColorScheme::Dark,
            Theme::System => self.store.system_scheme(),
        }
    }

    /// Flip the applied scheme and store it as an explicit choice.
    pub fn toggle(&self) -> ColorScheme {
        let next = match self.resolved() {
            ColorScheme::Light => Theme::Dark,
            ColorScheme::Dark => Theme::Light,
        };
        self.set(next);
        self.resolved()
    }

    /// Call `on_change` whenever the system scheme changes while the
    /// visitor follows the system setting.
    pub fn watch<F>(&self, on_change: F)
    where
        F: Fn(ColorScheme) + Send + Sync + 'static,
    {
        let store = Arc::clone(&self.store);
        self.store
            .subscribe_to_system_change(Box::new(move |scheme| {
                if Self::stored_theme(&store) == Theme::System {
                    on_change(scheme);
                }
            }));
    }

    fn stored_theme(store: &S) -> Theme {
        store
            .get(THEME_KEY)
            .and_then(|value| Theme::from_storage(&value))
            .unwrap_or_default()
    }
}
