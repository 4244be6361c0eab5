use crate::background::Background;
use crate::category::{Category, LinkItem, SubCategory};
use crate::preferences::UserPreferences;

/// Everything the storage collaborator hands over at startup
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct DashboardSnapshot {
    pub categories: Vec<Category>,
    pub background: Background,
    pub prefs: UserPreferences,
    /// The storage backend still uses its factory access code
    pub uses_default_access_code: bool,
}

impl DashboardSnapshot {
    /// Starter content written on first run
    pub fn seed() -> Self {
        let tech = Category::new("tech", "Tech").with_sub_categories(vec![
            SubCategory::default_group("tech-default").with_items(vec![
                LinkItem::new("github", "GitHub", "https://github.com")
                    .with_icon("github"),
                LinkItem::new("crates", "crates.io", "https://crates.io")
                    .with_icon("package")
                    .with_description("The Rust community's crate registry"),
            ]),
        ]);

        let reading = Category::new("reading", "Reading").with_sub_categories(vec![
            SubCategory::new("reading-news", "News").with_items(vec![
                LinkItem::new("hn", "Hacker News", "https://news.ycombinator.com")
                    .with_icon("newspaper"),
            ]),
            SubCategory::new("reading-docs", "Docs").with_items(vec![
                LinkItem::new("std", "Rust std", "https://doc.rust-lang.org/std/")
                    .with_icon("book-open"),
                LinkItem::new("docs-rs", "docs.rs", "https://docs.rs")
                    .with_icon("book"),
            ]),
        ]);

        Self {
            categories: vec![tech, reading],
            background: Background::default(),
            prefs: UserPreferences::default(),
            uses_default_access_code: true,
        }
    }
}
