//! Collection view models.
//!
//! The functions in [`builder`] are pure and total; [`ViewState`] holds the
//! per-grid selection that feeds them.

pub mod builder;
mod state;

pub use builder::{build, exclude, filter_category, merge_page, page_has_more, sort_items};
pub use state::ViewState;
