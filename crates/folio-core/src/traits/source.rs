//! Content source trait.

use async_trait::async_trait;

use crate::content::{Collection, ContentEntry};
use crate::query::QueryParams;
use crate::types::CollectionKind;
use crate::Result;

/// Something that can answer collection queries.
///
/// Implementations hold no mutable state shared between calls and never
/// retry. Every failure is returned as a classified [`crate::Error`].
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch one page of a collection.
    ///
    /// `preview` selects draft content and the preview credentials.
    async fn fetch_collection(
        &self,
        kind: CollectionKind,
        query: &QueryParams,
        preview: bool,
    ) -> Result<Collection>;

    /// Fetch a single entry by slug, with its body blocks.
    ///
    /// Returns `Ok(None)` if no entry has that slug.
    async fn fetch_entry(
        &self,
        kind: CollectionKind,
        slug: &str,
        preview: bool,
    ) -> Result<Option<ContentEntry>>;
}
