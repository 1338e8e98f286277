//! Filtering, sorting and page accumulation for content grids.

use std::collections::HashSet;

use crate::content::ContentItem;
use crate::query::SortOrder;
use crate::types::{Category, ItemId};

use super::ViewState;

/// Produce the ordered items a grid renders.
///
/// Applies, in order: removal of `exclude_id`, the selected category filter,
/// and a stable sort by publication date in the selected order.
pub fn build(
    items: &[ContentItem],
    state: &ViewState,
    exclude_id: Option<&ItemId>,
) -> Vec<ContentItem> {
    let mut out: Vec<ContentItem> = items
        .iter()
        .filter(|item| exclude_id != Some(&item.id))
        .filter(|item| matches_category(item, state.selected_category()))
        .cloned()
        .collect();
    sort_items(&mut out, state.sort_order());
    out
}

/// Remove the item with the given id, if present.
pub fn exclude(items: Vec<ContentItem>, id: &ItemId) -> Vec<ContentItem> {
    items.into_iter().filter(|item| &item.id != id).collect()
}

/// Keep only items in `category`; `None` keeps everything.
pub fn filter_category(items: Vec<ContentItem>, category: Option<Category>) -> Vec<ContentItem> {
    items
        .into_iter()
        .filter(|item| matches_category(item, category))
        .collect()
}

fn matches_category(item: &ContentItem, category: Option<Category>) -> bool {
    match category {
        Some(selected) => item.category == Some(selected),
        None => true,
    }
}

/// Stable sort by publication date.
///
/// Items without a date compare as the oldest. Equal dates keep their
/// relative input order.
pub fn sort_items(items: &mut [ContentItem], order: SortOrder) {
    match order {
        SortOrder::Newest => items.sort_by(|a, b| b.published_at.cmp(&a.published_at)),
        SortOrder::Oldest => items.sort_by(|a, b| a.published_at.cmp(&b.published_at)),
    }
}

/// Append the items of `page` whose ids are not already in `loaded`.
///
/// Returns the number of items appended. Merging the same page twice is a
/// no-op the second time.
pub fn merge_page<I>(loaded: &mut Vec<ContentItem>, page: I) -> usize
where
    I: IntoIterator<Item = ContentItem>,
{
    let mut seen: HashSet<ItemId> = loaded.iter().map(|item| item.id.clone()).collect();
    let before = loaded.len();
    for item in page {
        if seen.insert(item.id.clone()) {
            loaded.push(item);
        }
    }
    loaded.len() - before
}

/// Page-length heuristic for "load more" visibility.
///
/// True when the last page was full. Over-reports by one click when the
/// total is an exact multiple of the page size; prefer
/// [`Collection::has_more`](crate::Collection) when a total is known.
pub fn page_has_more(page_len: usize, page_size: u32) -> bool {
    page_size > 0 && page_len == page_size as usize
}
