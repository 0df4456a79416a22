//! Site content: the about section, timeline and project showcase.
//!
//! All copy is authored in both languages and rendered into plain strings
//! for one language at request time.

pub mod projects;
pub mod timeline;

use crate::i18n::preference::Theme;
use crate::i18n::{Lang, LocalizedText};
use serde::Serialize;

pub use projects::{project, projects, ProjectDetail, ProjectSummary};
pub use timeline::{entries_of, timeline, TimelineKind, TimelineView};

const ABOUT_HEADING: LocalizedText = LocalizedText::new("自己紹介", "About Me");

const ABOUT_BODY: LocalizedText = LocalizedText::new(
    "私はフロントエンドエンジニアで、ReactやNext.jsを使った開発が得意です。\
特に、ユーザーエクスペリエンスを重視したインターフェースの設計と実装に情熱を持っています。\
現在は、最新のウェブ技術を活用して、より良いウェブ体験を提供することに取り組んでいます。",
    "I am a front-end engineer who enjoys building with React and Next.js. \
I am passionate about designing and implementing interfaces centered on user experience, \
and I currently focus on using modern web technology to deliver better experiences on the web.",
);

const WORK_INTRO: LocalizedText = LocalizedText::new(
    "これまでのプログラミング関連のアルバイトの経験です。",
    "Programming-related jobs I have held so far.",
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageOption {
    pub code: &'static str,
    pub label: &'static str,
    pub badge: &'static str,
    pub selected: bool,
}

/// Entry in the theme menu; `value` is what the client stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AboutView {
    pub heading: &'static str,
    pub body: &'static str,
    pub work_intro: &'static str,
    pub work: Vec<TimelineView>,
    pub education: Vec<TimelineView>,
}

/// Everything the home page renders for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomePage {
    pub lang: Lang,
    pub languages: Vec<LanguageOption>,
    pub themes: Vec<ThemeOption>,
    pub about: AboutView,
    pub projects: Vec<ProjectSummary>,
}

pub fn language_options(current: Lang) -> Vec<LanguageOption> {
    Lang::ALL
        .iter()
        .map(|lang| LanguageOption {
            code: lang.code(),
            label: lang.native_name(),
            badge: lang.badge(),
            selected: *lang == current,
        })
        .collect()
}

pub fn theme_options(lang: Lang) -> Vec<ThemeOption> {
    Theme::ALL
        .iter()
        .map(|theme| ThemeOption {
            value: theme.storage_value(),
            label: theme.label(lang),
        })
        .collect()
}

pub fn home_page(lang: Lang) -> HomePage {
    let localize = |kind| {
        entries_of(kind)
            .into_iter()
            .map(|entry| entry.localize(lang))
            .collect::<Vec<_>>()
    };

    HomePage {
        lang,
        languages: language_options(lang),
        themes: theme_options(lang),
        about: AboutView {
            heading: ABOUT_HEADING.get(lang),
            body: ABOUT_BODY.get(lang),
            work_intro: WORK_INTRO.get(lang),
            work: localize(TimelineKind::Work),
            education: localize(TimelineKind::Education),
        },
        projects: projects().iter().map(|p| p.summary(lang)).collect(),
    }
}
