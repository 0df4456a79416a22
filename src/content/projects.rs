use crate::i18n::{Lang, LocalizedText};
use serde::Serialize;

/// A block of the project detail shown in the modal.
#[derive(Debug, Clone, Copy)]
pub enum ContentBlock {
    Heading(LocalizedText),
    Paragraph(LocalizedText),
    List(&'static [LocalizedText]),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectLinks {
    pub demo: Option<&'static str>,
    pub github: Option<&'static str>,
}

#[derive(Debug, Clone, Copy)]
pub struct Project {
    pub id: u32,
    pub title: &'static str,
    pub src: &'static str,
    pub description: LocalizedText,
    pub tags: &'static [&'static str],
    pub content: &'static [ContentBlock],
    pub links: ProjectLinks,
}

// ==================== Localized Views ====================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlockView {
    Heading { text: &'static str },
    Paragraph { text: &'static str },
    List { items: Vec<&'static str> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinksView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<&'static str>,
}

/// Card shown in the showcase grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub id: u32,
    pub title: &'static str,
    pub src: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
}

/// Full modal content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub summary: ProjectSummary,
    pub content: Vec<ContentBlockView>,
    pub links: LinksView,
}

impl ContentBlock {
    fn localize(&self, lang: Lang) -> ContentBlockView {
        match self {
            ContentBlock::Heading(text) => ContentBlockView::Heading {
                text: text.get(lang),
            },
            ContentBlock::Paragraph(text) => ContentBlockView::Paragraph {
                text: text.get(lang),
            },
            ContentBlock::List(items) => ContentBlockView::List {
                items: items.iter().map(|item| item.get(lang)).collect(),
            },
        }
    }
}

impl Project {
    pub fn summary(&self, lang: Lang) -> ProjectSummary {
        ProjectSummary {
            id: self.id,
            title: self.title,
            src: self.src,
            description: self.description.get(lang),
            tags: self.tags,
        }
    }

    pub fn detail(&self, lang: Lang) -> ProjectDetail {
        ProjectDetail {
            summary: self.summary(lang),
            content: self.content.iter().map(|block| block.localize(lang)).collect(),
            links: LinksView {
                demo: self.links.demo,
                github: self.links.github,
            },
        }
    }
}

/// All showcased projects in display order.
pub fn projects() -> &'static [Project] {
    PROJECTS
}

pub fn project(id: u32) -> Option<&'static Project> {
    PROJECTS.iter().find(|p| p.id == id)
}

static PROJECTS: &[Project] = &[
    Project {
        id: 1,
        title: "Portfolio Website",
        src: "/images/projects/portfolio.jpg",
        description: LocalizedText::new(
            "React + Astroで構築した個人ポートフォリオサイト。Three.jsによる3Dアニメーションとダークモード対応。",
            "A personal portfolio built with React and Astro, featuring a Three.js 3D animation and dark mode.",
        ),
        tags: &["React", "Astro", "TypeScript", "Three.js", "Tailwind CSS"],
        content: &[
            ContentBlock::Heading(LocalizedText::new("概要", "Overview")),
            ContentBlock::Paragraph(LocalizedText::new(
                "モダンなWeb技術を活用したポートフォリオサイト。パフォーマンスとアクセシビリティを重視した設計。",
                "A portfolio site built on modern web technology, designed with performance and accessibility in mind.",
            )),
            ContentBlock::Heading(LocalizedText::new("主な機能", "Key Features")),
            ContentBlock::List(&[
                LocalizedText::new("レスポンシブデザイン", "Responsive design"),
                LocalizedText::new("Three.jsによる3Dキューブアニメーション", "3D cube animation with Three.js"),
                LocalizedText::new("ダークモード切り替え", "Dark mode toggle"),
                LocalizedText::new("スムーススクロール", "Smooth scrolling"),
            ]),
        ],
        links: ProjectLinks {
            demo: Some("https://example.com"),
            github: Some("https://github.com/username/portfolio"),
        },
    },
    Project {
        id: 2,
        title: "E-Commerce Dashboard",
        src: "/images/projects/dashboard.jpg",
        description: LocalizedText::new(
            "Next.js 14とPrismaを使用した管理ダッシュボード。リアルタイム分析とグラフ表示機能。",
            "An admin dashboard built with Next.js 14 and Prisma, with real-time analytics and charts.",
        ),
        tags: &["Next.js", "Prisma", "PostgreSQL", "Chart.js", "shadcn/ui"],
        content: &[
            ContentBlock::Heading(LocalizedText::new("プロジェクト詳細", "Project Details")),
            ContentBlock::Paragraph(LocalizedText::new(
                "売上管理、在庫管理、顧客分析を統合したダッシュボード。Server Componentsを活用した高速レンダリング。",
                "A dashboard combining sales, inventory and customer analytics, rendered quickly with Server Components.",
            )),
            ContentBlock::Heading(LocalizedText::new("技術スタック", "Tech Stack")),
            ContentBlock::List(&[
                LocalizedText::same("Next.js 14 App Router"),
                LocalizedText::same("Prisma ORM + PostgreSQL"),
                LocalizedText::same("Chart.js / Recharts"),
                LocalizedText::new("shadcn/ui コンポーネント", "shadcn/ui components"),
            ]),
        ],
        links: ProjectLinks {
            demo: None,
            github: Some("https://github.com/username/dashboard"),
        },
    },
    Project {
        id: 3,
        title: "AI Chat Application",
        src: "/images/projects/chat.jpg",
        description: LocalizedText::new(
            "OpenAI APIを統合したリアルタイムチャットアプリ。ストリーミングレスポンスとマークダウン対応。",
            "A real-time chat app integrating the OpenAI API, with streaming responses and Markdown support.",
        ),
        tags: &["React", "TypeScript", "OpenAI", "WebSocket", "Tailwind CSS"],
        content: &[
            ContentBlock::Heading(LocalizedText::new("機能紹介", "Features")),
            ContentBlock::Paragraph(LocalizedText::new(
                "GPT-4を活用したAIチャットインターフェース。ストリーミングレスポンスで自然な会話体験を実現。",
                "An AI chat interface powered by GPT-4, with streaming responses for a natural conversation flow.",
            )),
            ContentBlock::Heading(LocalizedText::new("主な実装", "Implementation")),
            ContentBlock::List(&[
                LocalizedText::new("OpenAI API統合", "OpenAI API integration"),
                LocalizedText::same("Server-Sent Events (SSE)"),
                LocalizedText::new(
                    "マークダウン + シンタックスハイライト",
                    "Markdown with syntax highlighting",
                ),
                LocalizedText::new("会話履歴管理", "Conversation history"),
            ]),
        ],
        links: ProjectLinks {
            demo: Some("https://chat.example.com"),
            github: Some("https://github.com/username/ai-chat"),
        },
    },
    Project {
        id: 4,
        title: "Task Management App",
        src: "/images/projects/tasks.jpg",
        description: LocalizedText::new(
            "ドラッグ&ドロップ対応のタスク管理アプリ。認証機能とリアルタイム同期。",
            "A drag-and-drop task manager with authentication and real-time sync.",
        ),
        tags: &["Vue 3", "Supabase", "Pinia", "dnd-kit", "Vite"],
        content: &[
            ContentBlock::Heading(LocalizedText::new("アプリケーション概要", "Application Overview")),
            ContentBlock::Paragraph(LocalizedText::new(
                "直感的な操作でタスクを整理できるカンバン形式の管理ツール。",
                "A kanban-style tool for organizing tasks with intuitive interactions.",
            )),
            ContentBlock::Heading(LocalizedText::new("実装機能", "Implemented Features")),
            ContentBlock::List(&[
                LocalizedText::new("ドラッグ&ドロップによるタスク移動", "Drag-and-drop task moves"),
                LocalizedText::new("Supabase認証", "Supabase authentication"),
                LocalizedText::new("リアルタイムデータ同期", "Real-time data sync"),
                LocalizedText::new("タグ・期限・優先度管理", "Tags, due dates and priorities"),
            ]),
        ],
        links: ProjectLinks {
            demo: Some("https://tasks.example.com"),
            github: None,
        },
    },
    Project {
        id: 5,
        title: "Weather Forecast PWA",
        src: "/images/projects/weather.jpg",
        description: LocalizedText::new(
            "Progressive Web Appとして動作する天気予報アプリ。オフライン対応とプッシュ通知。",
            "A weather forecast app that runs as a Progressive Web App, with offline support and push notifications.",
        ),
        tags: &["React", "PWA", "Service Worker", "IndexedDB", "Weather API"],
        content: &[
            ContentBlock::Heading(LocalizedText::new("PWAの特徴", "PWA Highlights")),
            ContentBlock::Paragraph(LocalizedText::new(
                "ネットワークがなくても直近の予報を確認できるオフラインファースト設計。",
                "An offline-first design that keeps the latest forecast available without a network.",
            )),
            ContentBlock::Heading(LocalizedText::new("実装内容", "Implementation")),
            ContentBlock::List(&[
                LocalizedText::new("Service Worker によるキャッシュ戦略", "Caching strategy with a Service Worker"),
                LocalizedText::new("IndexedDB でのデータ永続化", "Data persistence in IndexedDB"),
                LocalizedText::new("プッシュ通知（天気アラート）", "Push notifications for weather alerts"),
                LocalizedText::new("位置情報ベースの天気取得", "Location-based forecasts"),
            ]),
        ],
        links: ProjectLinks {
            demo: Some("https://weather.example.com"),
            github: Some("https://github.com/username/weather-pwa"),
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_project_ids_unique() {
        let ids: HashSet<u32> = projects().iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), projects().len());
    }

    #[test]
    fn test_project_lookup() {
        assert_eq!(project(3).map(|p| p.title), Some("AI Chat Application"));
        assert!(project(999).is_none());
    }

    #[test]
    fn test_every_text_has_both_languages() {
        for p in projects() {
            assert!(!p.description.ja.is_empty() && !p.description.en.is_empty());
            for lang in Lang::ALL {
                for block in p.detail(lang).content {
                    match block {
                        ContentBlockView::Heading { text } | ContentBlockView::Paragraph { text } => {
                            assert!(!text.is_empty())
                        }
                        ContentBlockView::List { items } => assert!(!items.is_empty()),
                    }
                }
            }
        }
    }

    #[test]
    fn test_detail_localized() {
        let p = project(1).unwrap();
        let ja = p.detail(Lang::Ja);
        let en = p.detail(Lang::En);
        assert_eq!(ja.content[0], ContentBlockView::Heading { text: "概要" });
        assert_eq!(en.content[0], ContentBlockView::Heading { text: "Overview" });
        assert_eq!(ja.summary.title, en.summary.title);
    }

    #[test]
    fn test_detail_serialization() {
        let json = serde_json::to_value(project(2).unwrap().detail(Lang::En)).unwrap();
        assert_eq!(json["id"], 2);
        assert_eq!(json["content"][0]["type"], "heading");
        assert_eq!(json["content"][3]["type"], "list");
        assert!(json["links"].get("demo").is_none());
        assert_eq!(json["links"]["github"], "https://github.com/username/dashboard");
    }
}
