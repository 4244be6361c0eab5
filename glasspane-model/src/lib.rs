//! Core data model definitions shared across Glasspane crates.
#![allow(missing_docs)]

pub mod background;
pub mod category;
pub mod error;
pub mod geometry;
pub mod ids;
pub mod preferences;
pub mod prelude;
pub mod snapshot;

// Intentionally curated re-exports for downstream consumers.
pub use background::{Background, BackgroundKind, DEFAULT_BACKGROUND};
pub use category::{Category, LinkIcon, LinkItem, SubCategory, validate_tree};
pub use error::{ModelError, Result as ModelResult};
pub use geometry::{Bounds, HighlightGeometry};
pub use ids::{CategoryId, LinkId, SubCategoryId};
pub use preferences::{
    DEFAULT_CARD_OPACITY, DEFAULT_THEME_COLOR, HexColor, LayoutPreferences,
    PreferencesPatch, ThemeMode, ThemePreferences, UserPreferences,
};
pub use snapshot::DashboardSnapshot;
