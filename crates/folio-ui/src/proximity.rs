//! Active-item tracking for stacked, equal-height items.

use tracing::trace;

use crate::events::{ScrollListener, SectionGeometry, ViewportProbe};

/// Index of the item whose centre is nearest the viewport centre.
///
/// Item `i` is centred at `section_top + i * item_height + item_height / 2`.
/// Ties go to the lowest index. Returns `None` when there are no items.
pub fn active_index(
    count: usize,
    item_height: f64,
    section_top: f64,
    viewport_height: f64,
) -> Option<usize> {
    let viewport_center = viewport_height / 2.0;
    let mut best: Option<(usize, f64)> = None;

    for i in 0..count {
        let center = section_top + i as f64 * item_height + item_height / 2.0;
        let distance = (center - viewport_center).abs();
        match best {
            Some((_, d)) if d <= distance => {}
            _ => best = Some((i, distance)),
        }
    }

    best.map(|(i, _)| i)
}

/// Progress through a section, clamped to `[0, 1]`.
///
/// Computed as `-section_top / (section_height - viewport_height)`. A section
/// no taller than the viewport has nothing to scroll through and reports
/// `0.0` until its top passes the viewport top, then `1.0`.
pub fn scroll_progress(section_top: f64, section_height: f64, viewport_height: f64) -> f64 {
    let scrollable = section_height - viewport_height;
    if scrollable.is_nan() || scrollable <= 0.0 {
        return if section_top < 0.0 { 1.0 } else { 0.0 };
    }
    let progress = -section_top / scrollable;
    if progress.is_nan() {
        return 0.0;
    }
    progress.clamp(0.0, 1.0)
}

/// Tracks the active item of one section across scroll events.
#[derive(Clone, Debug, PartialEq)]
pub struct ProximityTracker {
    item_count: usize,
    item_height: f64,
    active: Option<usize>,
    progress: f64,
}

impl ProximityTracker {
    pub fn new(item_count: usize, item_height: f64) -> Self {
        Self {
            item_count,
            item_height,
            active: None,
            progress: 0.0,
        }
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Recompute from the section's current geometry.
    ///
    /// Returns `Some(index)` only when the active item changed; an unchanged
    /// index means no re-render is needed. Progress is always refreshed.
    pub fn update(&mut self, section: SectionGeometry, viewport_height: f64) -> Option<usize> {
        self.progress = scroll_progress(section.top, section.height, viewport_height);

        let next = active_index(self.item_count, self.item_height, section.top, viewport_height);
        if next == self.active {
            return None;
        }
        trace!(from = ?self.active, to = ?next, "Active item change");
        self.active = next;
        next
    }
}

/// A [`ProximityTracker`] bound to a named section, for use on a
/// [`ScrollBus`](crate::ScrollBus).
#[derive(Clone, Debug)]
pub struct SectionTracker {
    section: String,
    tracker: ProximityTracker,
}

impl SectionTracker {
    pub fn new(section: impl Into<String>, tracker: ProximityTracker) -> Self {
        Self {
            section: section.into(),
            tracker,
        }
    }

    pub fn tracker(&self) -> &ProximityTracker {
        &self.tracker
    }
}

impl ScrollListener for SectionTracker {
    fn on_scroll(&mut self, probe: &dyn ViewportProbe) {
        // Unmounted sections keep their last state.
        if let Some(geometry) = probe.section_geometry(&self.section) {
            let viewport_height = probe.scroll_snapshot().viewport_height;
            self.tracker.update(geometry, viewport_height);
        }
    }
}
