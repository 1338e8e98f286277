//! Content items and collections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::blocks::ContentBlock;
use crate::types::{Category, ItemId};

/// A reference to an image asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// A single insight or work item as shown in a grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    /// Stable identifier, unique within a collection.
    pub id: ItemId,

    /// Category, if the CMS value is one this crate knows.
    #[serde(default, deserialize_with = "lenient_category")]
    pub category: Option<Category>,

    /// Publication time. Items without one sort as the oldest.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,

    pub title: String,
    pub slug: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
}

/// Unknown category names degrade to `None` instead of failing the item.
fn lenient_category<'de, D>(deserializer: D) -> Result<Option<Category>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

/// One page of a content collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    /// Items in this page.
    pub items: Vec<ContentItem>,

    /// Total number of items matching the query, across all pages.
    ///
    /// Never smaller than `items.len()`.
    pub total: u32,

    /// Whether more items exist beyond this page.
    pub has_more: bool,
}

impl Collection {
    /// Build a collection from one page of results.
    ///
    /// `skip` is the offset the page was requested at. A `total` smaller than
    /// the number of items is raised to match.
    pub fn from_page(items: Vec<ContentItem>, total: u32, skip: u32) -> Self {
        let len = u32::try_from(items.len()).unwrap_or(u32::MAX);
        let total = total.max(len);
        let has_more = u64::from(skip) + u64::from(len) < u64::from(total);
        Self {
            items,
            total,
            has_more,
        }
    }

    /// An empty collection.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            has_more: false,
        }
    }
}

/// A single entry with its body blocks, as used by detail pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentEntry {
    #[serde(flatten)]
    pub item: ContentItem,
    pub body: Vec<ContentBlock>,
}
