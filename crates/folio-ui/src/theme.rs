//! Scroll-synchronized page theme.
//!
//! A breakpoint table maps scroll percentage to a theme: the last breakpoint
//! at or below the current percentage wins. Wide and narrow viewports use
//! separate tables.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

use folio_core::Result;
use folio_core::error::InvalidInputError;

use crate::events::{ScrollListener, ScrollSnapshot, ViewportProbe};

/// Viewport width, in CSS pixels, below which the narrow table applies.
pub const NARROW_VIEWPORT_MAX: f64 = 768.0;

/// Visual theme of the page chrome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    Blue,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Blue => "blue",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Viewport class selecting a breakpoint table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewportClass {
    #[default]
    Wide,
    Narrow,
}

impl ViewportClass {
    /// Classify a viewport width against a threshold.
    pub fn from_width(width: f64, narrow_below: f64) -> Self {
        if width < narrow_below {
            ViewportClass::Narrow
        } else {
            ViewportClass::Wide
        }
    }
}

/// A theme change point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    /// Scroll percentage, `0..=100`, at which `theme` starts.
    pub percentage: f64,
    pub theme: Theme,
}

impl Breakpoint {
    pub fn new(percentage: f64, theme: Theme) -> Self {
        Self { percentage, theme }
    }
}

/// Breakpoints ordered by ascending percentage.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BreakpointTable(Vec<Breakpoint>);

impl BreakpointTable {
    /// Validate and wrap a breakpoint list.
    ///
    /// # Errors
    ///
    /// Returns an error if a percentage is outside `[0, 100]` or the list is
    /// not in ascending order.
    pub fn new(breakpoints: Vec<Breakpoint>) -> Result<Self> {
        for (i, bp) in breakpoints.iter().enumerate() {
            if !(0.0..=100.0).contains(&bp.percentage) {
                return Err(InvalidInputError::Breakpoints {
                    reason: format!("percentage {} at index {} is outside 0..=100", bp.percentage, i),
                }
                .into());
            }
        }
        if let Some(i) = breakpoints
            .windows(2)
            .position(|w| w[1].percentage < w[0].percentage)
        {
            return Err(InvalidInputError::Breakpoints {
                reason: format!("breakpoint {} is lower than the one before it", i + 1),
            }
            .into());
        }
        Ok(Self(breakpoints))
    }

    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.0
    }

    /// Theme at a scroll percentage, or `None` before the first breakpoint.
    pub fn theme_at(&self, percentage: f64) -> Option<Theme> {
        theme_at(&self.0, percentage)
    }
}

/// Theme of the last breakpoint whose percentage is `<= percentage`.
///
/// `breakpoints` must be sorted ascending. Returns `None` when every
/// breakpoint lies above `percentage`.
pub fn theme_at(breakpoints: &[Breakpoint], percentage: f64) -> Option<Theme> {
    let after = breakpoints.partition_point(|bp| bp.percentage <= percentage);
    after.checked_sub(1).map(|i| breakpoints[i].theme)
}

/// Tracks the current theme as the page scrolls and resizes.
///
/// Every input returns `Some(theme)` only when the derived theme changed, so
/// callers re-render on change and nothing else.
#[derive(Clone, Debug)]
pub struct ThemeController {
    wide: BreakpointTable,
    narrow: BreakpointTable,
    fallback: Theme,
    narrow_below: f64,
    viewport: ViewportClass,
    percentage: f64,
    current: Theme,
}

impl ThemeController {
    /// Create a controller at the top of the page on a wide viewport.
    ///
    /// `fallback` applies whenever the scroll position lies before the first
    /// breakpoint of the active table.
    pub fn new(wide: BreakpointTable, narrow: BreakpointTable, fallback: Theme) -> Self {
        let current = wide.theme_at(0.0).unwrap_or(fallback);
        Self {
            wide,
            narrow,
            fallback,
            narrow_below: NARROW_VIEWPORT_MAX,
            viewport: ViewportClass::Wide,
            percentage: 0.0,
            current,
        }
    }

    /// Use a different narrow-viewport threshold.
    pub fn with_narrow_below(mut self, width: f64) -> Self {
        self.narrow_below = width;
        self
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn viewport(&self) -> ViewportClass {
        self.viewport
    }

    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    /// New scroll percentage. Non-finite values are ignored.
    pub fn set_percentage(&mut self, percentage: f64) -> Option<Theme> {
        if !percentage.is_finite() {
            return None;
        }
        self.percentage = percentage.clamp(0.0, 100.0);
        self.recompute()
    }

    /// New viewport class.
    pub fn on_viewport(&mut self, viewport: ViewportClass) -> Option<Theme> {
        self.viewport = viewport;
        self.recompute()
    }

    /// New viewport width.
    pub fn on_resize(&mut self, width: f64) -> Option<Theme> {
        self.on_viewport(ViewportClass::from_width(width, self.narrow_below))
    }

    /// Apply a full geometry snapshot in one step.
    pub fn on_snapshot(&mut self, snapshot: &ScrollSnapshot) -> Option<Theme> {
        self.viewport = ViewportClass::from_width(snapshot.viewport_width, self.narrow_below);
        self.percentage = snapshot.percentage();
        self.recompute()
    }

    fn table(&self) -> &BreakpointTable {
        match self.viewport {
            ViewportClass::Wide => &self.wide,
            ViewportClass::Narrow => &self.narrow,
        }
    }

    fn recompute(&mut self) -> Option<Theme> {
        let next = self.table().theme_at(self.percentage).unwrap_or(self.fallback);
        if next == self.current {
            return None;
        }
        trace!(from = %self.current, to = %next, percentage = self.percentage, "Theme change");
        self.current = next;
        Some(next)
    }
}

impl ScrollListener for ThemeController {
    fn on_scroll(&mut self, probe: &dyn ViewportProbe) {
        self.on_snapshot(&probe.scroll_snapshot());
    }
}
