//! Filesystem storage for content fixtures.
//!
//! Layout under the root directory:
//!
//! ```text
//! <root>/insights.json              JSON array of items
//! <root>/work.json
//! <root>/entries/<kind>/<slug>.json item fields plus a "body" block list
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use folio_core::error::{ContentError, Error, InvalidInputError};
use folio_core::{CollectionKind, ContentBlock, ContentEntry, ContentItem, Result};

fn map_io(path: &Path, err: std::io::Error) -> Error {
    Error::Content(ContentError::Storage {
        message: format!("{}: {}", path.display(), err),
    })
}

fn map_json(path: &Path, err: serde_json::Error) -> Error {
    Error::Content(ContentError::Decode {
        message: format!("{}: {}", path.display(), err),
    })
}

/// On-disk form of an entry. Blocks stay raw until decoded so that unknown
/// kinds are reported as such.
#[derive(Debug, Serialize, Deserialize)]
struct StoredEntry {
    #[serde(flatten)]
    item: ContentItem,
    #[serde(default)]
    body: Vec<Value>,
}

/// Fixture directory reader and writer.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a new store at the given root directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_path(&self, kind: CollectionKind) -> PathBuf {
        self.root.join(format!("{}.json", kind.as_str()))
    }

    fn entry_path(&self, kind: CollectionKind, slug: &str) -> Result<PathBuf> {
        // Slugs become file names.
        if slug.is_empty() || slug.contains(['/', '\\']) || slug.starts_with('.') {
            return Err(InvalidInputError::Other {
                message: format!("invalid slug '{}'", slug),
            }
            .into());
        }
        Ok(self
            .root
            .join("entries")
            .join(kind.as_str())
            .join(format!("{}.json", slug)))
    }

    /// Read every item of a collection.
    ///
    /// A missing collection file is reported like a response without the
    /// collection field.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub async fn read_collection(&self, kind: CollectionKind) -> Result<Vec<ContentItem>> {
        let path = self.collection_path(kind);
        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ContentError::MissingCollection {
                    field: kind.collection_field().to_string(),
                }
                .into());
            }
            Err(e) => return Err(map_io(&path, e)),
        };
        debug!(path = %path.display(), "Read collection file");
        serde_json::from_slice(&raw).map_err(|e| map_json(&path, e))
    }

    /// Replace the items of a collection.
    pub async fn write_collection(&self, kind: CollectionKind, items: &[ContentItem]) -> Result<()> {
        let path = self.collection_path(kind);
        write_json(&path, &items).await
    }

    /// Read an entry by slug. Returns `None` if it does not exist.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub async fn read_entry(&self, kind: CollectionKind, slug: &str) -> Result<Option<ContentEntry>> {
        let path = self.entry_path(kind, slug)?;
        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(map_io(&path, e)),
        };

        let stored: StoredEntry = serde_json::from_slice(&raw).map_err(|e| map_json(&path, e))?;
        let body = stored
            .body
            .into_iter()
            .map(ContentBlock::from_value)
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(ContentEntry {
            item: stored.item,
            body,
        }))
    }

    /// Write an entry, keyed by its slug.
    pub async fn write_entry(&self, kind: CollectionKind, entry: &ContentEntry) -> Result<()> {
        let path = self.entry_path(kind, &entry.item.slug)?;
        let body = entry
            .body
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| map_json(&path, e))?;
        let stored = StoredEntry {
            item: entry.item.clone(),
            body,
        };
        write_json(&path, &stored).await
    }
}

async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| map_io(parent, e))?;
    }
    let json = serde_json::to_vec_pretty(value).map_err(|e| map_json(path, e))?;
    tokio::fs::write(path, json).await.map_err(|e| map_io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::ItemId;
    use tempfile::TempDir;

    fn item(id: &str) -> ContentItem {
        ContentItem {
            id: ItemId::new(id).unwrap(),
            category: None,
            published_at: None,
            title: id.to_string(),
            slug: format!("slug-{}", id),
            image: None,
            excerpt: None,
        }
    }

    #[tokio::test]
    async fn collection_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        store
            .write_collection(CollectionKind::Work, &[item("a"), item("b")])
            .await
            .unwrap();

        let items = store.read_collection(CollectionKind::Work).await.unwrap();
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn missing_collection_file() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        let err = store.read_collection(CollectionKind::Insights).await.unwrap_err();
        assert!(matches!(err, Error::Content(ContentError::MissingCollection { .. })));
    }

    #[tokio::test]
    async fn corrupt_collection_file_is_decode_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("work.json"), "{not json").unwrap();
        let store = FileStore::new(dir.path());
        let err = store.read_collection(CollectionKind::Work).await.unwrap_err();
        assert!(matches!(err, Error::Content(ContentError::Decode { .. })));
    }

    #[tokio::test]
    async fn entry_roundtrip_and_missing() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        let entry = ContentEntry {
            item: item("e1"),
            body: vec![ContentBlock::Quote {
                text: "Form follows feeling.".into(),
                attribution: None,
            }],
        };
        store.write_entry(CollectionKind::Insights, &entry).await.unwrap();

        let read = store
            .read_entry(CollectionKind::Insights, "slug-e1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(read, entry);

        assert!(store
            .read_entry(CollectionKind::Insights, "missing")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn path_like_slugs_rejected() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.read_entry(CollectionKind::Work, "../work").await.is_err());
    }
}
