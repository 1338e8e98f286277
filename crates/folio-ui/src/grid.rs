//! Content grid with guarded "load more" paging.
//!
//! A [`GridController`] owns one grid's [`ViewState`]. Pages are fetched one
//! at a time; a fetch that completes after the selection changed or the grid
//! was closed is discarded instead of being applied to state it no longer
//! belongs to.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, instrument, warn};

use folio_core::view::build;
use folio_core::{
    Category, CollectionKind, ContentItem, ContentSource, ItemId, QueryParams, Result, SortOrder,
    ViewState,
};

/// What a load request did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was fetched and merged.
    Loaded { added: usize },
    /// Another load was already in flight, or nothing changed; no fetch was
    /// made.
    Ignored,
    /// Every item has been loaded; no fetch was made.
    Exhausted,
    /// The fetch completed after a reset or close and was dropped.
    Discarded,
}

/// Render-ready snapshot of a grid.
#[derive(Clone, Debug, PartialEq)]
pub struct GridView {
    pub items: Vec<ContentItem>,
    pub selected_category: Option<Category>,
    pub sort_order: SortOrder,
    /// Whether to show the "load more" control.
    pub has_more: bool,
    /// Whether a page is currently being fetched.
    pub loading: bool,
    /// Total matching items, once a page has been fetched.
    pub total: Option<u32>,
}

#[derive(Debug)]
struct GridInner {
    state: ViewState,
    generation: u64,
    in_flight: bool,
    has_more: bool,
    total: Option<u32>,
    closed: bool,
}

impl GridInner {
    fn reset(&mut self) {
        self.generation += 1;
        self.in_flight = false;
        self.has_more = true;
        self.total = None;
    }
}

/// One content grid bound to a content source.
pub struct GridController<S> {
    source: Arc<S>,
    kind: CollectionKind,
    page_size: u32,
    featured: Option<ItemId>,
    preview: bool,
    inner: Mutex<GridInner>,
}

impl<S: ContentSource> GridController<S> {
    /// Create an empty grid. Nothing is fetched until [`load_more`](Self::load_more).
    ///
    /// # Errors
    ///
    /// Returns an error if `page_size` is zero.
    pub fn new(source: Arc<S>, kind: CollectionKind, page_size: u32) -> Result<Self> {
        // Validates the page size once, up front.
        QueryParams::new(page_size)?;
        Ok(Self {
            source,
            kind,
            page_size,
            featured: None,
            preview: false,
            inner: Mutex::new(GridInner {
                state: ViewState::new(),
                generation: 0,
                in_flight: false,
                has_more: true,
                total: None,
                closed: false,
            }),
        })
    }

    /// Exclude the featured item shown elsewhere on the page.
    pub fn with_featured(mut self, featured: Option<ItemId>) -> Self {
        self.featured = featured;
        self
    }

    /// Fetch draft content.
    pub fn with_preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }

    fn lock(&self) -> MutexGuard<'_, GridInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetch and merge the next page.
    ///
    /// Re-entrant calls while a page is in flight return
    /// [`LoadOutcome::Ignored`] without fetching. On error the state is left
    /// unchanged and the same page can be requested again.
    #[instrument(skip(self), fields(kind = %self.kind))]
    pub async fn load_more(&self) -> Result<LoadOutcome> {
        let (query, generation) = {
            let mut inner = self.lock();
            if inner.closed || inner.in_flight {
                return Ok(LoadOutcome::Ignored);
            }
            if !inner.has_more {
                return Ok(LoadOutcome::Exhausted);
            }

            let state = &inner.state;
            let query = QueryParams::new(self.page_size)?
                .with_skip(state.next_skip(self.page_size))
                .with_category(state.selected_category())
                .excluding(self.featured.clone())
                .with_sort(state.sort_order());

            inner.in_flight = true;
            (query, inner.generation)
        };

        debug!(skip = query.skip(), "Loading grid page");
        let result = self
            .source
            .fetch_collection(self.kind, &query, self.preview)
            .await;

        let mut inner = self.lock();
        if inner.closed || inner.generation != generation {
            warn!("Discarding stale grid page");
            return Ok(LoadOutcome::Discarded);
        }
        inner.in_flight = false;

        let collection = result?;
        let added = inner.state.apply_page(collection.items);
        inner.has_more = collection.has_more;
        inner.total = Some(collection.total);
        Ok(LoadOutcome::Loaded { added })
    }

    /// Select a category, or clear it with `None`.
    ///
    /// A change resets the grid and fetches the first page of the new
    /// selection. Selecting the current category does nothing.
    pub async fn select_category(&self, category: Option<Category>) -> Result<LoadOutcome> {
        {
            let mut inner = self.lock();
            if inner.closed || !inner.state.select_category(category) {
                return Ok(LoadOutcome::Ignored);
            }
            inner.reset();
        }
        self.load_more().await
    }

    /// Change the sort order, resetting and refetching on change.
    pub async fn set_sort_order(&self, order: SortOrder) -> Result<LoadOutcome> {
        {
            let mut inner = self.lock();
            if inner.closed || !inner.state.set_sort_order(order) {
                return Ok(LoadOutcome::Ignored);
            }
            inner.reset();
        }
        self.load_more().await
    }

    /// Flip the sort order.
    pub async fn toggle_sort(&self) -> Result<LoadOutcome> {
        let order = self.lock().state.sort_order().toggled();
        self.set_sort_order(order).await
    }

    /// Tear the grid down. Fetches still in flight are discarded when they
    /// complete, and later calls are ignored.
    pub fn close(&self) {
        let mut inner = self.lock();
        inner.closed = true;
        inner.generation += 1;
        inner.in_flight = false;
    }

    /// Current render-ready view.
    pub fn view(&self) -> GridView {
        let inner = self.lock();
        let state = &inner.state;
        GridView {
            items: build(state.loaded_items(), state, self.featured.as_ref()),
            selected_category: state.selected_category(),
            sort_order: state.sort_order(),
            has_more: inner.has_more,
            loading: inner.in_flight,
            total: inner.total,
        }
    }
}
