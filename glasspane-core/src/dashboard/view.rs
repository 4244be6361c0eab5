//! Owned, serializable picture of the dashboard for the rendering boundary

use glasspane_model::{
    Background, BackgroundKind, Category, HexColor, HighlightGeometry, LinkIcon,
    LinkId, SubCategoryId, ThemeMode, UserPreferences,
};
use serde::Serialize;

use crate::navigation::{DisplayItem, HighlightTicket, Selection};

/// Mix ratio toward black for hover states
const HOVER_DARKEN: f32 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub categories: Vec<Category>,
    pub selection: Selection,
    pub items: Vec<DisplayCard>,
    /// Label shown above the cards while a sub-category is active
    pub heading: Option<String>,
    pub shows_sub_navigation: bool,
    pub background: BackgroundView,
    pub prefs: UserPreferences,
    pub theme: ThemeVariables,
    pub highlight: HighlightGeometry,
    /// Measurement the renderer still owes, if any
    pub highlight_ticket: Option<HighlightTicket>,
    pub uses_default_access_code: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayCard {
    pub id: LinkId,
    pub title: String,
    pub url: String,
    pub icon: LinkIcon,
    pub tooltip: String,
    pub sub_category: SubCategoryId,
    pub group_label: String,
}

impl From<&DisplayItem<'_>> for DisplayCard {
    fn from(item: &DisplayItem<'_>) -> Self {
        Self {
            id: item.link.id.clone(),
            title: item.link.title.clone(),
            url: item.link.url.clone(),
            icon: item.link.icon.clone(),
            tooltip: item.link.tooltip(),
            sub_category: item.sub_category.id.clone(),
            group_label: item.group_label.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackgroundView {
    pub value: Background,
    pub kind: BackgroundKind,
}

impl From<&Background> for BackgroundView {
    fn from(background: &Background) -> Self {
        Self {
            value: background.clone(),
            kind: background.kind(),
        }
    }
}

/// Values for the theme's CSS custom properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeVariables {
    pub primary: String,
    /// `"r, g, b"`, for use inside `rgba(...)`
    pub primary_rgb: String,
    pub hover: String,
    pub mode: ThemeMode,
}

impl ThemeVariables {
    pub fn new(color: HexColor, mode: ThemeMode) -> Self {
        Self {
            primary: color.to_string(),
            primary_rgb: color.rgb_triplet(),
            hover: color.darken(HOVER_DARKEN).to_string(),
            mode,
        }
    }

    /// `(property, value)` pairs ready to set on the document root
    pub fn css_properties(&self) -> [(&'static str, &str); 3] {
        [
            ("--theme-primary", self.primary.as_str()),
            ("--theme-primary-rgb", self.primary_rgb.as_str()),
            ("--theme-hover", self.hover.as_str()),
        ]
    }
}
