//! Selection store coordinating the active category and sub-category

use glasspane_model::{Category, CategoryId, SubCategory, SubCategoryId};
use tracing::{debug, warn};

use super::display::{DisplayItem, derive_items};
use super::{DisplayPolicy, Selection, SelectionChange, SelectionPolicy};

/// Owns the category tree and the active selection over it
#[derive(Debug, Clone, Default)]
pub struct NavigationStore {
    categories: Vec<Category>,
    selection: Selection,
    selection_policy: SelectionPolicy,
    display_policy: DisplayPolicy,
}

impl NavigationStore {
    pub fn new(
        selection_policy: SelectionPolicy,
        display_policy: DisplayPolicy,
    ) -> Self {
        Self {
            categories: Vec::new(),
            selection: Selection::default(),
            selection_policy,
            display_policy,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_policy(&self) -> SelectionPolicy {
        self.selection_policy
    }

    pub fn display_policy(&self) -> DisplayPolicy {
        self.display_policy
    }

    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| &category.id == id)
    }

    pub fn active_category(&self) -> Option<&Category> {
        self.selection
            .active_category
            .as_ref()
            .and_then(|id| self.category(id))
    }

    pub fn active_sub_category(&self) -> Option<&SubCategory> {
        let category = self.active_category()?;
        self.selection
            .active_sub_category
            .as_ref()
            .and_then(|id| category.sub_category(id))
    }

    /// Swap in a new tree wholesale and repair the selection against it
    pub fn replace_categories(
        &mut self,
        categories: Vec<Category>,
    ) -> SelectionChange {
        self.categories = categories;
        self.validate_selection()
    }

    /// Activate `id` and apply the sub-category policy.
    ///
    /// Unknown ids leave the selection untouched and return `false`.
    pub fn select_category(&mut self, id: &CategoryId) -> bool {
        let Some(category) = self.category(id) else {
            warn!(category = %id, "ignoring selection of unknown category");
            return false;
        };

        let sub = match self.selection_policy {
            SelectionPolicy::FirstSubCategory => {
                category.first_sub_category().map(|sub| sub.id.clone())
            }
            SelectionPolicy::ClearSubCategory => None,
        };

        self.selection.active_category = Some(id.clone());
        self.selection.active_sub_category = sub;
        true
    }

    /// Activate a category and one of its sub-categories together.
    ///
    /// Both must exist and the sub-category must belong to the category;
    /// otherwise nothing changes and `false` is returned.
    pub fn select_sub_category(
        &mut self,
        category_id: &CategoryId,
        sub_category_id: &SubCategoryId,
    ) -> bool {
        let belongs = self
            .category(category_id)
            .is_some_and(|category| category.contains_sub_category(sub_category_id));

        if !belongs {
            warn!(
                category = %category_id,
                sub_category = %sub_category_id,
                "ignoring selection of sub-category outside its category"
            );
            return false;
        }

        self.selection.active_category = Some(category_id.clone());
        self.selection.active_sub_category = Some(sub_category_id.clone());
        true
    }

    /// Activate the first category, as done once after the initial load
    pub fn select_first(&mut self) -> bool {
        match self.categories.first().map(|category| category.id.clone()) {
            Some(id) => self.select_category(&id),
            None => {
                self.selection = Selection::default();
                false
            }
        }
    }

    /// Repair a selection that points at ids no longer in the tree.
    ///
    /// A missing (or absent) active category falls back to the first
    /// category, or to nothing for an empty tree. A missing active
    /// sub-category falls back to the active category's first sub-category.
    /// An absent sub-category is only filled in under
    /// [`SelectionPolicy::FirstSubCategory`]; the clearing policy treats it as
    /// the "browse all" view.
    pub fn validate_selection(&mut self) -> SelectionChange {
        let before = self.selection.clone();

        let category_valid = self
            .selection
            .active_category
            .as_ref()
            .is_some_and(|id| self.category(id).is_some());

        if !category_valid {
            self.selection.active_category =
                self.categories.first().map(|category| category.id.clone());
        }

        let active = self.active_category();
        let sub = match (active, self.selection.active_sub_category.as_ref()) {
            (None, _) => None,
            (Some(category), Some(sub_id)) => {
                if category.contains_sub_category(sub_id) {
                    Some(sub_id.clone())
                } else {
                    category.first_sub_category().map(|sub| sub.id.clone())
                }
            }
            (Some(category), None) => match self.selection_policy {
                SelectionPolicy::FirstSubCategory => {
                    category.first_sub_category().map(|sub| sub.id.clone())
                }
                SelectionPolicy::ClearSubCategory => None,
            },
        };
        self.selection.active_sub_category = sub;

        let change = SelectionChange {
            category: before.active_category != self.selection.active_category,
            sub_category: before.active_sub_category
                != self.selection.active_sub_category,
        };

        if change.is_changed() {
            debug!(
                category = ?self.selection.active_category,
                sub_category = ?self.selection.active_sub_category,
                "selection repaired"
            );
        }

        change
    }

    /// Cards to render for the current selection
    pub fn display_items(&self) -> Vec<DisplayItem<'_>> {
        match self.active_category() {
            Some(category) => derive_items(
                category,
                self.selection.active_sub_category.as_ref(),
                self.display_policy,
            ),
            None => Vec::new(),
        }
    }

    /// Heading shown above the cards while a sub-category is active
    pub fn display_heading(&self) -> Option<&str> {
        let category = self.active_category()?;
        let sub = self.active_sub_category()?;
        Some(sub.display_title(category))
    }

    /// Whether the active category warrants a second navigation row
    pub fn shows_sub_navigation(&self) -> bool {
        self.active_category()
            .is_some_and(Category::shows_sub_navigation)
    }
}
