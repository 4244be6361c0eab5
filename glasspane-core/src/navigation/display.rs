use glasspane_model::{Category, LinkItem, SubCategory, SubCategoryId};

use super::DisplayPolicy;

/// One card in the derived display list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayItem<'a> {
    pub link: &'a LinkItem,
    /// The group the link is stored in
    pub sub_category: &'a SubCategory,
    /// Label to present for that group. The parent category's title stands
    /// in for the default group.
    pub group_label: &'a str,
}

impl<'a> DisplayItem<'a> {
    fn new(category: &'a Category, sub: &'a SubCategory, link: &'a LinkItem) -> Self {
        Self {
            link,
            sub_category: sub,
            group_label: sub.display_title(category),
        }
    }
}

/// Builds the ordered card list for `category`.
///
/// Without an active sub-category every group's links are concatenated in
/// group order. With one, `policy` decides between showing only that group
/// or pinning it ahead of the rest. An active id that does not belong to the
/// category yields nothing under [`DisplayPolicy::Filtered`].
pub(crate) fn derive_items<'a>(
    category: &'a Category,
    active_sub: Option<&SubCategoryId>,
    policy: DisplayPolicy,
) -> Vec<DisplayItem<'a>> {
    let Some(active_sub) = active_sub else {
        return all_items(category).collect();
    };

    let pinned = category.sub_category(active_sub);

    match policy {
        DisplayPolicy::Filtered => pinned
            .map(|sub| {
                sub.items
                    .iter()
                    .map(|link| DisplayItem::new(category, sub, link))
                    .collect()
            })
            .unwrap_or_default(),
        DisplayPolicy::PinnedFirst => {
            let mut items = Vec::with_capacity(category.item_count());
            if let Some(sub) = pinned {
                items.extend(
                    sub.items
                        .iter()
                        .map(|link| DisplayItem::new(category, sub, link)),
                );
            }
            items.extend(
                all_items(category)
                    .filter(|item| &item.sub_category.id != active_sub),
            );
            items
        }
    }
}

fn all_items(category: &Category) -> impl Iterator<Item = DisplayItem<'_>> {
    category.sub_categories.iter().flat_map(move |sub| {
        sub.items
            .iter()
            .map(move |link| DisplayItem::new(category, sub, link))
    })
}
