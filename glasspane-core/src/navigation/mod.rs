//! Category/sub-category selection and the display list derived from it.
//!
//! [`NavigationStore`] owns the category tree handed over by storage or the
//! link manager, the active selection, and the rules that turn the two into
//! the ordered list of cards to render. [`HighlightTracker`] keeps the
//! sliding tab indicator in step with the active category.

use glasspane_model::{CategoryId, SubCategoryId};
use serde::{Deserialize, Serialize};

pub mod display;
pub mod highlight;
pub mod store;

pub use display::DisplayItem;
pub use highlight::{
    HighlightTicket, HighlightTracker, HighlightTrigger,
    compute_highlight_geometry,
};
pub use store::NavigationStore;

/// What happens to the sub-category when a category tab is clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Activate the category's first sub-category (none if it has none)
    #[default]
    FirstSubCategory,
    /// Leave no sub-category active, showing every link in the category
    ClearSubCategory,
}

/// How the display list treats an active sub-category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayPolicy {
    /// Only the active sub-category's links
    #[default]
    Filtered,
    /// The active sub-category's links first, then the rest of the category
    PinnedFirst,
}

/// The active category and optional sub-category. Session-only.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub active_category: Option<CategoryId>,
    pub active_sub_category: Option<SubCategoryId>,
}

/// Which parts of the selection moved during an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionChange {
    pub category: bool,
    pub sub_category: bool,
}

impl SelectionChange {
    pub fn is_changed(&self) -> bool {
        self.category || self.sub_category
    }
}
