//! Subcommand implementations.

pub mod get;
pub mod grid;
pub mod list;
pub mod proximity;
pub mod snapshot;
pub mod theme;

use anyhow::{Context, Result};

use folio_core::{Category, CollectionKind, ItemId, SortOrder};

pub fn parse_kind(value: &str) -> Result<CollectionKind> {
    value
        .parse::<CollectionKind>()
        .with_context(|| format!("Invalid collection '{}' (expected insights or work)", value))
}

pub fn parse_category(value: Option<&str>) -> Result<Option<Category>> {
    value
        .map(|c| c.parse::<Category>().with_context(|| format!("Invalid category '{}'", c)))
        .transpose()
}

pub fn parse_sort(value: &str) -> Result<SortOrder> {
    value
        .parse::<SortOrder>()
        .with_context(|| format!("Invalid sort order '{}' (expected newest or oldest)", value))
}

pub fn parse_item_id(value: Option<&str>) -> Result<Option<ItemId>> {
    value
        .map(|id| ItemId::new(id).context("Invalid item id"))
        .transpose()
}
