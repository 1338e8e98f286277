//! folio-ui - View state derived from content and scroll position.
//!
//! - [`grid`]: a content grid with category/sort selection and guarded
//!   "load more" paging over any [`ContentSource`](folio_core::ContentSource).
//! - [`theme`]: scroll-percentage to theme mapping with per-viewport
//!   breakpoint tables.
//! - [`proximity`]: which stacked item is nearest the viewport centre.
//! - [`events`]: geometry snapshots and the per-view scroll listener bus.
//!
//! Scroll handling is synchronous and pure apart from the derived state it
//! updates; geometry is always supplied by the caller.

pub mod events;
pub mod grid;
pub mod proximity;
pub mod theme;

pub use events::{ScrollBus, ScrollListener, ScrollSnapshot, SectionGeometry, ViewportProbe};
pub use grid::{GridController, GridView, LoadOutcome};
pub use proximity::{ProximityTracker, SectionTracker, active_index, scroll_progress};
pub use theme::{Breakpoint, BreakpointTable, Theme, ThemeController, ViewportClass, theme_at};
