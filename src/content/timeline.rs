use crate::i18n::{Lang, LocalizedText};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineKind {
    Work,
    Education,
}

/// Month precision date used on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub const fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// `2024-04`
    pub fn iso(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// `2024年4月` / `Apr 2024`
    pub fn display(&self, lang: Lang) -> String {
        match lang {
            Lang::Ja => format!("{}年{}月", self.year, self.month),
            Lang::En => NaiveDate::from_ymd_opt(self.year, self.month, 1)
                .map(|d| d.format("%b %Y").to_string())
                .unwrap_or_else(|| self.iso()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TimelineLocation {
    pub text: LocalizedText,
    pub url: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct TimelineEntry {
    pub id: u32,
    pub kind: TimelineKind,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub start: YearMonth,
    /// `None` while ongoing.
    pub end: Option<YearMonth>,
    pub location: Option<TimelineLocation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationView {
    pub text: &'static str,
    pub url: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineView {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: TimelineKind,
    pub title: &'static str,
    pub description: &'static str,
    pub start: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    /// Human readable period, e.g. `2021年1月 - 2022年1月`.
    pub period: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationView>,
}

impl TimelineEntry {
    pub fn localize(&self, lang: Lang) -> TimelineView {
        let present = match lang {
            Lang::Ja => "現在",
            Lang::En => "Present",
        };
        let end_display = self
            .end
            .map(|end| end.display(lang))
            .unwrap_or_else(|| present.to_string());

        TimelineView {
            id: self.id,
            kind: self.kind,
            title: self.title.get(lang),
            description: self.description.get(lang),
            start: self.start.iso(),
            end: self.end.map(|end| end.iso()),
            period: format!("{} - {}", self.start.display(lang), end_display),
            location: self.location.map(|loc| LocationView {
                text: loc.text.get(lang),
                url: loc.url,
            }),
        }
    }
}

/// Timeline entries, most recent first.
pub fn timeline() -> Vec<&'static TimelineEntry> {
    let mut entries: Vec<&'static TimelineEntry> = TIMELINE.iter().collect();
    entries.sort_by(|a, b| b.start.cmp(&a.start));
    entries
}

pub fn entries_of(kind: TimelineKind) -> Vec<&'static TimelineEntry> {
    timeline().into_iter().filter(|e| e.kind == kind).collect()
}

static TIMELINE: &[TimelineEntry] = &[
    TimelineEntry {
        id: 1,
        kind: TimelineKind::Work,
        title: LocalizedText::new("バックエンドエンジニア", "Back-end Engineer"),
        description: LocalizedText::new("バックエンドの実装など", "Back-end implementation and more"),
        start: YearMonth::new(2024, 4),
        end: None,
        location: Some(TimelineLocation {
            text: LocalizedText::same("Mui Lab Inc"),
            url: "https://example.com",
        }),
    },
    TimelineEntry {
        id: 2,
        kind: TimelineKind::Work,
        title: LocalizedText::new("ABC Inc バックエンド開発", "Back-end Developer at ABC Inc"),
        description: LocalizedText::new(
            "Node.js と Express を用いた RESTful API の開発に従事。",
            "Worked on building RESTful APIs using Node.js and Express.",
        ),
        start: YearMonth::new(2021, 1),
        end: Some(YearMonth::new(2022, 1)),
        location: Some(TimelineLocation {
            text: LocalizedText::same("Star Up"),
            url: "https://example.com",
        }),
    },
    TimelineEntry {
        id: 3,
        kind: TimelineKind::Education,
        title: LocalizedText::new(
            "京都大学工学部物理工学科",
            "Kyoto University, Faculty of Engineering, Physics and Engineering",
        ),
        description: LocalizedText::new(
            "ソフトウェア開発を中心にコンピュータサイエンスを学ぶ。",
            "Studied computer science with a focus on software development.",
        ),
        start: YearMonth::new(2018, 4),
        end: Some(YearMonth::new(2022, 3)),
        location: Some(TimelineLocation {
            text: LocalizedText::new("京都大学", "Kyoto University"),
            url: "https://www.kyoto-u.ac.jp/",
        }),
    },
    TimelineEntry {
        id: 4,
        kind: TimelineKind::Education,
        title: LocalizedText::new("Web開発ブートキャンプ", "Web Development Bootcamp"),
        description: LocalizedText::new(
            "フルスタックWeb開発に特化した集中ブートキャンプを修了。",
            "Completed an intensive bootcamp focused on full-stack web development.",
        ),
        start: YearMonth::new(2020, 1),
        end: Some(YearMonth::new(2020, 12)),
        location: None,
    },
];
