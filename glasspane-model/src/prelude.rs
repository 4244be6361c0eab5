//! Presentation-facing snapshot of the types surface.
//! Prefer importing from this module instead of individual tree nodes when
//! working in the server or other rendering layers.

pub use super::background::{Background, BackgroundKind};
pub use super::category::{Category, LinkIcon, LinkItem, SubCategory};
pub use super::geometry::{Bounds, HighlightGeometry};
pub use super::ids::{CategoryId, LinkId, SubCategoryId};
pub use super::preferences::{
    HexColor, LayoutPreferences, PreferencesPatch, ThemeMode, ThemePreferences,
    UserPreferences,
};
pub use super::snapshot::DashboardSnapshot;
