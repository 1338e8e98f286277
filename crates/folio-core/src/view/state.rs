//! Per-grid view state.

use crate::content::ContentItem;
use crate::query::SortOrder;
use crate::types::Category;

use super::builder::merge_page;

/// Selection and accumulated items of one content grid.
///
/// `page` is the 1-based number of the next page to request. Changing the
/// category or the sort order resets the grid to page 1 with no items, since
/// both change which items belong on each server-side page.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    selected_category: Option<Category>,
    sort_order: SortOrder,
    page: u32,
    loaded_items: Vec<ContentItem>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            selected_category: None,
            sort_order: SortOrder::default(),
            page: 1,
            loaded_items: Vec::new(),
        }
    }

    pub fn selected_category(&self) -> Option<Category> {
        self.selected_category
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn loaded_items(&self) -> &[ContentItem] {
        &self.loaded_items
    }

    /// Offset of the next page for the given page size.
    pub fn next_skip(&self, page_size: u32) -> u32 {
        (self.page - 1).saturating_mul(page_size)
    }

    /// Select a category (or clear it). Returns true if the selection
    /// changed, in which case the grid was reset.
    pub fn select_category(&mut self, category: Option<Category>) -> bool {
        if self.selected_category == category {
            return false;
        }
        self.selected_category = category;
        self.reset();
        true
    }

    /// Set the sort order. Returns true if it changed, in which case the
    /// grid was reset.
    pub fn set_sort_order(&mut self, order: SortOrder) -> bool {
        if self.sort_order == order {
            return false;
        }
        self.sort_order = order;
        self.reset();
        true
    }

    /// Flip between newest and oldest first.
    pub fn toggle_sort(&mut self) {
        self.set_sort_order(self.sort_order.toggled());
    }

    /// Apply a successfully fetched page: merge unseen items and advance to
    /// the next page. Returns the number of items added.
    pub fn apply_page(&mut self, items: Vec<ContentItem>) -> usize {
        let added = merge_page(&mut self.loaded_items, items);
        self.page = self.page.saturating_add(1);
        added
    }

    /// Back to page 1 with nothing loaded. Selection is kept.
    pub fn reset(&mut self) {
        self.page = 1;
        self.loaded_items.clear();
    }
}
