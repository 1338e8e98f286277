//! Grid command implementation.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use folio_ui::{GridController, LoadOutcome};

use super::{parse_category, parse_item_id, parse_kind, parse_sort};
use crate::output;
use crate::source::CliSource;

#[derive(Args, Debug)]
pub struct GridArgs {
    /// Collection to page through (insights or work)
    pub collection: String,

    /// Items per page
    #[arg(long, default_value_t = 6)]
    pub page_size: u32,

    /// Number of pages to load (0 loads until exhausted)
    #[arg(long, default_value_t = 1)]
    pub pages: u32,

    /// Selected category
    #[arg(long)]
    pub category: Option<String>,

    /// Sort order (newest or oldest)
    #[arg(long, default_value = "newest")]
    pub sort: String,

    /// Featured item id, excluded from the grid
    #[arg(long)]
    pub featured: Option<String>,

    /// Use preview credentials and include drafts
    #[arg(long)]
    pub preview: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(endpoint: Option<&str>, args: GridArgs) -> Result<()> {
    let kind = parse_kind(&args.collection)?;
    let category = parse_category(args.category.as_deref())?;
    let sort = parse_sort(&args.sort)?;

    let source = Arc::new(CliSource::open(endpoint)?);
    let grid = GridController::new(source, kind, args.page_size)
        .context("Invalid page size")?
        .with_featured(parse_item_id(args.featured.as_deref())?)
        .with_preview(args.preview);

    // Selection changes reset the grid and fetch the first page themselves,
    // so only pages loaded since the last reset count.
    let mut loaded = 0;
    if category.is_some() {
        let outcome = grid.select_category(category).await?;
        loaded = 0;
        report(outcome, &mut loaded);
    }
    if sort != grid.view().sort_order {
        let outcome = grid.set_sort_order(sort).await?;
        loaded = 0;
        report(outcome, &mut loaded);
    }

    while args.pages == 0 || loaded < args.pages {
        let outcome = grid.load_more().await.context("Failed to load page")?;
        if outcome == LoadOutcome::Exhausted {
            break;
        }
        report(outcome, &mut loaded);
    }

    let view = grid.view();
    output::items(&view.items, args.pretty)?;

    eprintln!();
    eprintln!("{}: {}", "Pages".dimmed(), loaded);
    eprintln!("{}: {}", "Items".dimmed(), view.items.len());
    if let Some(total) = view.total {
        eprintln!("{}: {}", "Total".dimmed(), total);
    }
    eprintln!("{}: {}", "Has more".dimmed(), view.has_more);

    Ok(())
}

fn report(outcome: LoadOutcome, loaded: &mut u32) {
    if let LoadOutcome::Loaded { added } = outcome {
        *loaded += 1;
        eprintln!("{} page {} (+{} items)", "Loaded".dimmed(), loaded, added);
    }
}
