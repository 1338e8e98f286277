//! Geometry snapshots and scroll listener registration.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, trace};

use folio_core::Result;
use folio_core::error::InvalidInputError;

/// Page-level scroll geometry at one instant, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollSnapshot {
    /// Distance scrolled from the top of the document.
    pub scroll_top: f64,
    /// Total document height.
    pub scroll_height: f64,
    /// Visible viewport height.
    pub viewport_height: f64,
    /// Visible viewport width.
    pub viewport_width: f64,
}

impl ScrollSnapshot {
    /// Scroll position as a percentage of the scrollable distance.
    ///
    /// Pages that do not scroll report 0. The result is always within
    /// `[0, 100]`.
    pub fn percentage(&self) -> f64 {
        let distance = self.scroll_height - self.viewport_height;
        if distance.is_nan() || distance <= 0.0 || !self.scroll_top.is_finite() {
            return 0.0;
        }
        (self.scroll_top / distance * 100.0).clamp(0.0, 100.0)
    }
}

/// Bounding box of a section relative to the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SectionGeometry {
    /// Offset of the section's top edge from the viewport's top edge.
    /// Negative once the section has scrolled past the top.
    pub top: f64,
    /// Height of the section.
    pub height: f64,
}

/// Platform adapter that measures the page.
pub trait ViewportProbe {
    /// Current page scroll geometry.
    fn scroll_snapshot(&self) -> ScrollSnapshot;

    /// Geometry of a named section, if it is mounted.
    fn section_geometry(&self, section: &str) -> Option<SectionGeometry>;
}

/// Receives scroll notifications.
pub trait ScrollListener {
    fn on_scroll(&mut self, probe: &dyn ViewportProbe);
}

/// Shared handle, so the view can read derived state the bus updates.
impl<T: ScrollListener> ScrollListener for Rc<RefCell<T>> {
    fn on_scroll(&mut self, probe: &dyn ViewportProbe) {
        self.borrow_mut().on_scroll(probe)
    }
}

/// Scroll listeners keyed by view.
///
/// Each view attaches at most one listener, and detaches it on teardown.
/// Listeners are notified in attach order.
#[derive(Default)]
pub struct ScrollBus {
    listeners: Vec<(String, Box<dyn ScrollListener>)>,
}

impl ScrollBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the listener for `view`.
    ///
    /// # Errors
    ///
    /// Returns an error if `view` already has a listener; the existing one
    /// is kept.
    pub fn attach<L>(&mut self, view: impl Into<String>, listener: L) -> Result<()>
    where
        L: ScrollListener + 'static,
    {
        let view = view.into();
        if self.is_attached(&view) {
            return Err(InvalidInputError::Other {
                message: format!("view '{}' already has a scroll listener", view),
            }
            .into());
        }
        debug!(view, "Attaching scroll listener");
        self.listeners.push((view, Box::new(listener)));
        Ok(())
    }

    /// Detach the listener for `view`. Returns false if none was attached.
    pub fn detach(&mut self, view: &str) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(v, _)| v != view);
        let removed = self.listeners.len() != before;
        if removed {
            debug!(view, "Detached scroll listener");
        }
        removed
    }

    pub fn is_attached(&self, view: &str) -> bool {
        self.listeners.iter().any(|(v, _)| v == view)
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Notify every listener of a scroll or resize.
    pub fn dispatch(&mut self, probe: &dyn ViewportProbe) {
        trace!(listeners = self.listeners.len(), "Dispatching scroll");
        for (_, listener) in &mut self.listeners {
            listener.on_scroll(probe);
        }
    }
}
