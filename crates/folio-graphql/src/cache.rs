//! Caller-owned TTL cache over any content source.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::trace;

use folio_core::{Collection, CollectionKind, ContentEntry, ContentSource, QueryParams, Result};

type CollectionKey = (CollectionKind, QueryParams, bool);
type EntryKey = (CollectionKind, String, bool);

#[derive(Debug, Clone)]
struct Cached<T> {
    value: T,
    stored_at: Instant,
}

/// Wraps a [`ContentSource`] and remembers successful results for `ttl`.
///
/// Keys are the full request: collection kind, query parameters and preview
/// flag. Failures are never cached. The cache belongs to whoever constructs
/// it; there is no process-wide instance.
#[derive(Debug)]
pub struct CachedSource<S> {
    inner: S,
    ttl: Duration,
    collections: Mutex<HashMap<CollectionKey, Cached<Collection>>>,
    entries: Mutex<HashMap<EntryKey, Cached<Option<ContentEntry>>>>,
}

impl<S> CachedSource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            collections: Mutex::new(HashMap::new()),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the wrapped source.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Drop every cached result.
    pub async fn invalidate(&self) {
        self.collections.lock().await.clear();
        self.entries.lock().await.clear();
    }

    fn evict_expired<K, T>(&self, map: &mut HashMap<K, Cached<T>>) {
        let before = map.len();
        map.retain(|_, c| c.stored_at.elapsed() < self.ttl);
        if map.len() < before {
            trace!(evicted = before - map.len(), "Evicted expired cache entries");
        }
    }

    fn fresh<T: Clone>(&self, cached: Option<&Cached<T>>) -> Option<T> {
        cached
            .filter(|c| c.stored_at.elapsed() < self.ttl)
            .map(|c| c.value.clone())
    }
}

#[async_trait]
impl<S: ContentSource> ContentSource for CachedSource<S> {
    async fn fetch_collection(
        &self,
        kind: CollectionKind,
        query: &QueryParams,
        preview: bool,
    ) -> Result<Collection> {
        let key = (kind, query.clone(), preview);
        if let Some(hit) = self.fresh(self.collections.lock().await.get(&key)) {
            trace!(kind = %kind, "Collection cache hit");
            return Ok(hit);
        }

        let value = self.inner.fetch_collection(kind, query, preview).await?;
        let mut collections = self.collections.lock().await;
        self.evict_expired(&mut collections);
        collections.insert(
            key,
            Cached {
                value: value.clone(),
                stored_at: Instant::now(),
            },
        );
        Ok(value)
    }

    async fn fetch_entry(
        &self,
        kind: CollectionKind,
        slug: &str,
        preview: bool,
    ) -> Result<Option<ContentEntry>> {
        let key = (kind, slug.to_string(), preview);
        if let Some(hit) = self.fresh(self.entries.lock().await.get(&key)) {
            trace!(kind = %kind, slug, "Entry cache hit");
            return Ok(hit);
        }

        let value = self.inner.fetch_entry(kind, slug, preview).await?;
        let mut entries = self.entries.lock().await;
        self.evict_expired(&mut entries);
        entries.insert(
            key,
            Cached {
                value: value.clone(),
                stored_at: Instant::now(),
            },
        );
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use folio_core::error::{Error, NetworkError};

    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl ContentSource for CountingSource {
        async fn fetch_collection(
            &self,
            _kind: CollectionKind,
            _query: &QueryParams,
            _preview: bool,
        ) -> Result<Collection> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Error::Network(NetworkError::Timeout));
            }
            Ok(Collection::empty())
        }

        async fn fetch_entry(
            &self,
            _kind: CollectionKind,
            _slug: &str,
            _preview: bool,
        ) -> Result<Option<ContentEntry>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn hit_within_ttl_and_refetch_after() {
        let cache = CachedSource::new(CountingSource::default(), Duration::from_secs(60));
        let query = QueryParams::new(6).unwrap();

        cache.fetch_collection(CollectionKind::Insights, &query, false).await.unwrap();
        cache.fetch_collection(CollectionKind::Insights, &query, false).await.unwrap();
        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(61)).await;
        cache.fetch_collection(CollectionKind::Insights, &query, false).await.unwrap();
        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn key_includes_query_and_preview() {
        let cache = CachedSource::new(CountingSource::default(), Duration::from_secs(60));
        let first = QueryParams::new(6).unwrap();
        let second = first.next_page();

        cache.fetch_collection(CollectionKind::Insights, &first, false).await.unwrap();
        cache.fetch_collection(CollectionKind::Insights, &first, true).await.unwrap();
        cache.fetch_collection(CollectionKind::Insights, &second, false).await.unwrap();
        cache.fetch_collection(CollectionKind::Work, &first, false).await.unwrap();
        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn failures_are_not_cached() {
        let source = CountingSource {
            fail: true,
            ..Default::default()
        };
        let cache = CachedSource::new(source, Duration::from_secs(60));
        let query = QueryParams::new(6).unwrap();

        assert!(cache.fetch_collection(CollectionKind::Work, &query, false).await.is_err());
        assert!(cache.fetch_collection(CollectionKind::Work, &query, false).await.is_err());
        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn expired_results_are_evicted_on_insert() {
        let cache = CachedSource::new(CountingSource::default(), Duration::from_secs(60));
        let first = QueryParams::new(6).unwrap();
        let second = first.next_page();

        cache.fetch_collection(CollectionKind::Insights, &first, false).await.unwrap();
        cache.fetch_entry(CollectionKind::Work, "rebrand", false).await.unwrap();
        tokio::time::advance(Duration::from_secs(61)).await;

        cache.fetch_collection(CollectionKind::Insights, &second, false).await.unwrap();
        cache.fetch_entry(CollectionKind::Work, "launch", false).await.unwrap();

        let collections = cache.collections.lock().await;
        assert_eq!(collections.len(), 1);
        assert!(collections.contains_key(&(CollectionKind::Insights, second, false)));
        drop(collections);

        let entries = cache.entries.lock().await;
        assert_eq!(entries.len(), 1);
        assert!(entries.contains_key(&(CollectionKind::Work, "launch".to_string(), false)));
    }

    #[tokio::test(start_paused = true)]
    async fn invalidate_clears_entries() {
        let cache = CachedSource::new(CountingSource::default(), Duration::from_secs(60));

        cache.fetch_entry(CollectionKind::Work, "rebrand", false).await.unwrap();
        cache.invalidate().await;
        cache.fetch_entry(CollectionKind::Work, "rebrand", false).await.unwrap();
        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 2);
    }
}
