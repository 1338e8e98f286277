//! List command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use folio_core::{ContentSource, QueryParams};

use super::{parse_category, parse_item_id, parse_kind, parse_sort};
use crate::output;
use crate::source::CliSource;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Collection to query (insights or work)
    pub collection: String,

    /// Only items in this category (e.g. Branding)
    #[arg(long)]
    pub category: Option<String>,

    /// Sort order (newest or oldest)
    #[arg(long, default_value = "newest")]
    pub sort: String,

    /// Maximum number of items to return
    #[arg(long, default_value_t = 12)]
    pub limit: u32,

    /// Number of items to skip
    #[arg(long, default_value_t = 0)]
    pub skip: u32,

    /// Item id to leave out (the featured item)
    #[arg(long)]
    pub exclude: Option<String>,

    /// Use preview credentials and include drafts
    #[arg(long)]
    pub preview: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(endpoint: Option<&str>, args: ListArgs) -> Result<()> {
    let kind = parse_kind(&args.collection)?;
    let query = QueryParams::new(args.limit)
        .context("Invalid limit")?
        .with_skip(args.skip)
        .with_category(parse_category(args.category.as_deref())?)
        .excluding(parse_item_id(args.exclude.as_deref())?)
        .with_sort(parse_sort(&args.sort)?);

    let source = CliSource::open(endpoint)?;
    let collection = source
        .fetch_collection(kind, &query, args.preview)
        .await
        .context("Failed to fetch collection")?;

    if collection.items.is_empty() {
        eprintln!("{}", "No items found.".dimmed());
        return Ok(());
    }

    output::items(&collection.items, args.pretty)?;

    eprintln!();
    eprintln!("{}: {}", "Total".dimmed(), collection.total);
    if collection.has_more {
        eprintln!("{}: {}", "Next skip".dimmed(), query.next_page().skip());
    }

    Ok(())
}
