//! Get command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use folio_core::ContentSource;

use super::parse_kind;
use crate::output;
use crate::source::CliSource;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Collection to query (insights or work)
    pub collection: String,

    /// Entry slug
    pub slug: String,

    /// Use preview credentials and include drafts
    #[arg(long)]
    pub preview: bool,
}

pub async fn run(endpoint: Option<&str>, args: GetArgs) -> Result<()> {
    let kind = parse_kind(&args.collection)?;
    let source = CliSource::open(endpoint)?;

    let entry = source
        .fetch_entry(kind, &args.slug, args.preview)
        .await
        .context("Failed to fetch entry")?;

    match entry {
        Some(entry) => output::json_pretty(&entry),
        None => bail!("No {} entry with slug '{}'", kind, args.slug),
    }
}
