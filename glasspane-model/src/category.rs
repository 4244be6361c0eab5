use std::collections::HashSet;

use crate::error::{ModelError, Result};
use crate::ids::{CategoryId, LinkId, SubCategoryId};

/// Icon shown on a link card.
///
/// Stored as a single string: values with an `http`/`data:` prefix are image
/// references, anything else is a symbolic icon name resolved by the
/// presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum LinkIcon {
    Symbol(String),
    Image(String),
}

impl LinkIcon {
    pub fn as_str(&self) -> &str {
        match self {
            LinkIcon::Symbol(name) => name,
            LinkIcon::Image(url) => url,
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, LinkIcon::Image(_))
    }
}

impl Default for LinkIcon {
    fn default() -> Self {
        LinkIcon::Symbol("link".to_string())
    }
}

impl From<String> for LinkIcon {
    fn from(raw: String) -> Self {
        if raw.starts_with("http") || raw.starts_with("data:") {
            LinkIcon::Image(raw)
        } else {
            LinkIcon::Symbol(raw)
        }
    }
}

impl From<&str> for LinkIcon {
    fn from(raw: &str) -> Self {
        LinkIcon::from(raw.to_string())
    }
}

impl From<LinkIcon> for String {
    fn from(icon: LinkIcon) -> Self {
        match icon {
            LinkIcon::Symbol(name) => name,
            LinkIcon::Image(url) => url,
        }
    }
}

/// A single bookmark entry
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkItem {
    pub id: LinkId,
    pub title: String,
    pub url: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub icon: LinkIcon,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub description: Option<String>,
}

impl LinkItem {
    pub fn new(
        id: impl Into<LinkId>,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: url.into(),
            icon: LinkIcon::default(),
            description: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<LinkIcon>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Hover tooltip text: site, link, and description when present
    pub fn tooltip(&self) -> String {
        match &self.description {
            Some(description) => format!(
                "{}\n{}\n{}",
                self.title, self.url, description
            ),
            None => format!("{}\n{}", self.title, self.url),
        }
    }
}

/// Second-level grouping inside a category
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SubCategory {
    pub id: SubCategoryId,
    pub title: String,
    /// Marks the placeholder group of a category without real subdivisions.
    /// Presented under the parent category's title.
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_default: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: Vec<LinkItem>,
}

impl SubCategory {
    pub fn new(id: impl Into<SubCategoryId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            is_default: false,
            items: Vec::new(),
        }
    }

    /// Placeholder group for a category that is not subdivided
    pub fn default_group(id: impl Into<SubCategoryId>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            is_default: true,
            items: Vec::new(),
        }
    }

    pub fn with_items(mut self, items: Vec<LinkItem>) -> Self {
        self.items = items;
        self
    }

    /// User-facing label, substituting the parent's title for the default group
    pub fn display_title<'a>(&'a self, parent: &'a Category) -> &'a str {
        if self.is_default {
            &parent.title
        } else {
            &self.title
        }
    }
}

/// Top-level navigational grouping of links
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Category {
    pub id: CategoryId,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sub_categories: Vec<SubCategory>,
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            sub_categories: Vec::new(),
        }
    }

    pub fn with_sub_categories(mut self, subs: Vec<SubCategory>) -> Self {
        self.sub_categories = subs;
        self
    }

    pub fn sub_category(&self, id: &SubCategoryId) -> Option<&SubCategory> {
        self.sub_categories.iter().find(|sub| &sub.id == id)
    }

    pub fn contains_sub_category(&self, id: &SubCategoryId) -> bool {
        self.sub_category(id).is_some()
    }

    pub fn first_sub_category(&self) -> Option<&SubCategory> {
        self.sub_categories.first()
    }

    /// Total number of links across all sub-categories
    pub fn item_count(&self) -> usize {
        self.sub_categories.iter().map(|sub| sub.items.len()).sum()
    }

    /// Whether the second navigation row has anything worth showing: more
    /// than one group, or a single group that is a real subdivision.
    pub fn shows_sub_navigation(&self) -> bool {
        match self.sub_categories.as_slice() {
            [] => false,
            [only] => !only.is_default,
            _ => true,
        }
    }
}

/// Checks the tree-wide identity invariants: non-empty ids, category ids
/// unique across the tree, sub-category ids unique within their parent.
pub fn validate_tree(categories: &[Category]) -> Result<()> {
    let mut seen = HashSet::with_capacity(categories.len());

    for category in categories {
        if category.id.is_empty() {
            return Err(ModelError::EmptyId("category"));
        }
        if !seen.insert(&category.id) {
            return Err(ModelError::DuplicateCategory(category.id.to_string()));
        }

        let mut seen_subs = HashSet::with_capacity(category.sub_categories.len());
        for sub in &category.sub_categories {
            if sub.id.is_empty() {
                return Err(ModelError::EmptyId("sub-category"));
            }
            if !seen_subs.insert(&sub.id) {
                return Err(ModelError::DuplicateSubCategory {
                    category: category.id.to_string(),
                    sub_category: sub.id.to_string(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tech() -> Category {
        Category::new("c1", "Tech").with_sub_categories(vec![
            SubCategory::default_group("s1")
                .with_items(vec![LinkItem::new("l1", "Rust", "https://rust-lang.org")]),
        ])
    }

    #[test]
    fn default_group_takes_parent_title() {
        let category = tech();
        let sub = &category.sub_categories[0];
        assert_eq!(sub.display_title(&category), "Tech");
    }

    #[test]
    fn user_title_default_is_not_a_sentinel() {
        let category = Category::new("c1", "Tech").with_sub_categories(vec![
            SubCategory::new("s1", "Default"),
        ]);
        let sub = &category.sub_categories[0];
        assert_eq!(sub.display_title(&category), "Default");
        assert!(category.shows_sub_navigation());
    }

    #[test]
    fn sub_navigation_hidden_for_lone_default_group() {
        assert!(!tech().shows_sub_navigation());
        assert!(!Category::new("c2", "News").shows_sub_navigation());

        let split = Category::new("c3", "Dev").with_sub_categories(vec![
            SubCategory::default_group("a"),
            SubCategory::new("b", "Docs"),
        ]);
        assert!(split.shows_sub_navigation());
    }

    #[test]
    fn icon_classification_follows_prefix() {
        assert!(LinkIcon::from("https://example.com/a.png").is_image());
        assert!(LinkIcon::from("data:image/png;base64,AAAA").is_image());
        assert!(!LinkIcon::from("github").is_image());
    }

    #[test]
    fn tooltip_includes_description_when_present() {
        let link = LinkItem::new("l1", "Rust", "https://rust-lang.org");
        assert_eq!(link.tooltip(), "Rust\nhttps://rust-lang.org");
        let link = link.with_description("Systems language");
        assert!(link.tooltip().ends_with("\nSystems language"));
    }

    #[test]
    fn validate_tree_rejects_duplicates() {
        let tree = vec![tech(), tech()];
        assert_eq!(
            validate_tree(&tree),
            Err(ModelError::DuplicateCategory("c1".to_string()))
        );

        let dup_sub = Category::new("c9", "Dup").with_sub_categories(vec![
            SubCategory::new("s", "A"),
            SubCategory::new("s", "B"),
        ]);
        assert!(matches!(
            validate_tree(&[dup_sub]),
            Err(ModelError::DuplicateSubCategory { .. })
        ));

        // Sub-category ids only need to be unique within their parent.
        let a = Category::new("a", "A")
            .with_sub_categories(vec![SubCategory::new("s", "One")]);
        let b = Category::new("b", "B")
            .with_sub_categories(vec![SubCategory::new("s", "Two")]);
        assert!(validate_tree(&[a, b]).is_ok());
    }

    #[test]
    fn validate_tree_rejects_empty_ids() {
        let tree = vec![Category::new("", "Nameless")];
        assert_eq!(validate_tree(&tree), Err(ModelError::EmptyId("category")));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn category_json_uses_camel_case_and_defaults() {
        let raw = r#"{
            "id": "c1",
            "title": "Tech",
            "subCategories": [
                { "id": "s1", "title": "", "isDefault": true,
                  "items": [{ "id": "l1", "title": "Rust",
                              "url": "https://rust-lang.org", "icon": "rust" }] },
                { "id": "s2", "title": "Docs" }
            ]
        }"#;
        let category: Category = serde_json::from_str(raw).unwrap();
        assert!(category.sub_categories[0].is_default);
        assert!(!category.sub_categories[1].is_default);
        assert!(category.sub_categories[1].items.is_empty());
        assert_eq!(
            category.sub_categories[0].items[0].icon,
            LinkIcon::Symbol("rust".to_string())
        );
    }
}
