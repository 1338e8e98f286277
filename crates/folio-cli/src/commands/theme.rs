//! Theme command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};

use folio_ui::{Breakpoint, BreakpointTable, Theme, ThemeController, ViewportClass};

use crate::output;

#[derive(Args, Debug)]
pub struct ThemeArgs {
    /// JSON file with "wide" and "narrow" breakpoint lists and a "fallback" theme
    #[arg(long)]
    pub breakpoints: PathBuf,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 1280.0)]
    pub width: f64,

    /// Scroll percentages to evaluate, in order
    #[arg(required = true, allow_negative_numbers = true)]
    pub percentages: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct ThemeFile {
    wide: Vec<Breakpoint>,
    #[serde(default)]
    narrow: Option<Vec<Breakpoint>>,
    fallback: Theme,
}

#[derive(Debug, Serialize)]
struct ThemeStep {
    percentage: f64,
    theme: Theme,
    changed: bool,
}

pub fn run(args: ThemeArgs) -> Result<()> {
    let raw = std::fs::read_to_string(&args.breakpoints)
        .with_context(|| format!("Failed to read {}", args.breakpoints.display()))?;
    let file: ThemeFile = serde_json::from_str(&raw).context("Invalid breakpoint file")?;

    let narrow = file.narrow.unwrap_or_else(|| file.wide.clone());
    let wide = BreakpointTable::new(file.wide).context("Invalid wide breakpoints")?;
    let narrow = BreakpointTable::new(narrow).context("Invalid narrow breakpoints")?;

    let mut controller = ThemeController::new(wide, narrow, file.fallback);
    controller.on_resize(args.width);

    let viewport = match controller.viewport() {
        ViewportClass::Wide => "wide",
        ViewportClass::Narrow => "narrow",
    };
    output::field("Viewport", viewport);

    for percentage in args.percentages {
        let changed = controller.set_percentage(percentage).is_some();
        output::json(&ThemeStep {
            percentage: controller.percentage(),
            theme: controller.current(),
            changed,
        })?;
    }

    Ok(())
}
