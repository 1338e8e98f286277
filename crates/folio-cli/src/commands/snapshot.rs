//! Snapshot command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use folio_core::{CollectionKind, ContentSource, QueryParams};
use folio_file::FileStore;

use super::parse_kind;
use crate::output;
use crate::source::CliSource;

/// Items requested per page while copying a collection.
const PAGE_SIZE: u32 = 100;

#[derive(Args, Debug)]
pub struct SnapshotArgs {
    /// Destination fixture directory
    pub dir: PathBuf,

    /// Collections to copy (defaults to all)
    #[arg(long = "collection")]
    pub collections: Vec<String>,

    /// Skip fetching entry bodies
    #[arg(long)]
    pub no_entries: bool,

    /// Use preview credentials and include drafts
    #[arg(long)]
    pub preview: bool,
}

pub async fn run(endpoint: Option<&str>, args: SnapshotArgs) -> Result<()> {
    let kinds = if args.collections.is_empty() {
        vec![CollectionKind::Insights, CollectionKind::Work]
    } else {
        args.collections
            .iter()
            .map(|c| parse_kind(c))
            .collect::<Result<Vec<_>>>()?
    };

    let source = CliSource::open(endpoint)?;
    let store = FileStore::new(&args.dir);

    for kind in kinds {
        let mut items = Vec::new();
        let mut query = QueryParams::new(PAGE_SIZE)?;
        loop {
            let page = source
                .fetch_collection(kind, &query, args.preview)
                .await
                .with_context(|| format!("Failed to fetch {}", kind))?;
            items.extend(page.items);
            if !page.has_more {
                break;
            }
            query = query.next_page();
        }

        store
            .write_collection(kind, &items)
            .await
            .with_context(|| format!("Failed to write {}", kind))?;

        let mut entries = 0;
        if !args.no_entries {
            for item in &items {
                let entry = source
                    .fetch_entry(kind, &item.slug, args.preview)
                    .await
                    .with_context(|| format!("Failed to fetch {} '{}'", kind, item.slug))?;
                if let Some(entry) = entry {
                    store.write_entry(kind, &entry).await?;
                    entries += 1;
                }
            }
        }

        eprintln!(
            "{} {}: {} items, {} entries",
            "Copied".dimmed(),
            kind,
            items.len(),
            entries
        );
    }

    output::success("Snapshot written");
    output::field("Directory", &args.dir.display().to_string());

    Ok(())
}
