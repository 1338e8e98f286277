//! File-backed content source.

use std::collections::HashSet;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use folio_core::view::{filter_category, sort_items};
use folio_core::{
    Collection, CollectionKind, ContentEntry, ContentItem, ContentSource, QueryParams, Result,
};

use crate::store::FileStore;

/// A content source answering queries from fixture files.
///
/// Filtering, ordering and windowing follow the content API: the featured
/// item and other categories are removed, items are ordered by publication
/// date, and `skip`/`limit` select the page. The preview flag is accepted and
/// ignored; fixtures have no draft state.
#[derive(Debug, Clone)]
pub struct FileSource {
    store: FileStore,
}

impl FileSource {
    /// Create a new source over the given fixture directory.
    pub fn new(root: impl AsRef<std::path::Path>) -> Self {
        Self {
            store: FileStore::new(root),
        }
    }

    /// Access the underlying file store.
    pub fn store(&self) -> &FileStore {
        &self.store
    }
}

#[async_trait]
impl ContentSource for FileSource {
    #[instrument(skip(self, query), fields(kind = %kind, skip = query.skip(), limit = query.limit()))]
    async fn fetch_collection(
        &self,
        kind: CollectionKind,
        query: &QueryParams,
        preview: bool,
    ) -> Result<Collection> {
        debug!(preview, "Fetching collection from files");
        let items = self.store.read_collection(kind).await?;

        let mut seen = HashSet::new();
        let items: Vec<ContentItem> = items
            .into_iter()
            .filter(|item| {
                let fresh = seen.insert(item.id.clone());
                if !fresh {
                    warn!(id = %item.id, "Dropping duplicate fixture item");
                }
                fresh
            })
            .filter(|item| query.filter().exclude_id.as_ref() != Some(&item.id))
            .collect();

        let mut matching = filter_category(items, query.filter().category);
        sort_items(&mut matching, query.sort());

        let total = u32::try_from(matching.len()).unwrap_or(u32::MAX);
        let page = matching
            .into_iter()
            .skip(query.skip() as usize)
            .take(query.limit() as usize)
            .collect();

        Ok(Collection::from_page(page, total, query.skip()))
    }

    #[instrument(skip(self), fields(kind = %kind))]
    async fn fetch_entry(
        &self,
        kind: CollectionKind,
        slug: &str,
        preview: bool,
    ) -> Result<Option<ContentEntry>> {
        debug!(preview, "Fetching entry from files");
        self.store.read_entry(kind, slug).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    use super::*;
    use folio_core::{Category, ItemId, SortOrder};

    fn item(id: &str, category: Category, day: u32) -> ContentItem {
        ContentItem {
            id: ItemId::new(id).unwrap(),
            category: Some(category),
            published_at: Some(Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()),
            title: id.to_string(),
            slug: id.to_string(),
            image: None,
            excerpt: None,
        }
    }

    async fn seeded() -> (TempDir, FileSource) {
        let dir = TempDir::new().unwrap();
        let source = FileSource::new(dir.path());
        source
            .store()
            .write_collection(
                CollectionKind::Insights,
                &[
                    item("a", Category::Branding, 1),
                    item("b", Category::Digital, 2),
                    item("c", Category::Branding, 3),
                    item("d", Category::Branding, 4),
                    item("e", Category::Branding, 5),
                ],
            )
            .await
            .unwrap();
        (dir, source)
    }

    fn ids(collection: &Collection) -> Vec<&str> {
        collection.items.iter().map(|i| i.id.as_str()).collect()
    }

    #[tokio::test]
    async fn pages_newest_first() {
        let (_dir, source) = seeded().await;
        let query = QueryParams::new(2).unwrap();

        let first = source
            .fetch_collection(CollectionKind::Insights, &query, false)
            .await
            .unwrap();
        assert_eq!(ids(&first), ["e", "d"]);
        assert_eq!(first.total, 5);
        assert!(first.has_more);

        let last = source
            .fetch_collection(CollectionKind::Insights, &query.next_page().next_page(), false)
            .await
            .unwrap();
        assert_eq!(ids(&last), ["a"]);
        assert!(!last.has_more);
    }

    #[tokio::test]
    async fn filters_category_and_featured() {
        let (_dir, source) = seeded().await;
        let query = QueryParams::new(10)
            .unwrap()
            .with_category(Some(Category::Branding))
            .excluding(Some(ItemId::new("e").unwrap()))
            .with_sort(SortOrder::Oldest);

        let page = source
            .fetch_collection(CollectionKind::Insights, &query, false)
            .await
            .unwrap();
        assert_eq!(ids(&page), ["a", "c", "d"]);
        assert_eq!(page.total, 3);
    }

    #[tokio::test]
    async fn missing_entry_is_none() {
        let (_dir, source) = seeded().await;
        let entry = source
            .fetch_entry(CollectionKind::Insights, "nothing-here", false)
            .await
            .unwrap();
        assert!(entry.is_none());
    }
}
