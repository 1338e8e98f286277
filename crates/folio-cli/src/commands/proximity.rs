//! Proximity command implementation.

use anyhow::Result;
use clap::Args;

use folio_ui::{ProximityTracker, SectionGeometry};

use crate::output;

#[derive(Args, Debug)]
pub struct ProximityArgs {
    /// Number of items in the section
    #[arg(long)]
    pub count: usize,

    /// Height of one item in pixels
    #[arg(long)]
    pub item_height: f64,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 800.0)]
    pub viewport_height: f64,

    /// Section height in pixels (defaults to count * item height)
    #[arg(long)]
    pub section_height: Option<f64>,

    /// Section top offsets relative to the viewport, in scroll order
    #[arg(required = true, allow_negative_numbers = true)]
    pub tops: Vec<f64>,
}

pub fn run(args: ProximityArgs) -> Result<()> {
    let height = args
        .section_height
        .unwrap_or(args.count as f64 * args.item_height);
    let mut tracker = ProximityTracker::new(args.count, args.item_height);

    for top in args.tops {
        let changed = tracker.update(SectionGeometry { top, height }, args.viewport_height);
        output::json(&serde_json::json!({
            "top": top,
            "active": tracker.active(),
            "progress": tracker.progress(),
            "changed": changed.is_some(),
        }))?;
    }

    Ok(())
}
