//! Content source selection.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use folio_core::{
    Collection, CollectionKind, ContentConfig, ContentEntry, ContentSource, EndpointUrl,
    QueryParams,
};
use folio_file::FileSource;
use folio_graphql::{CachedSource, GraphQlSource};

/// How long a fetched page is reused within one command.
const CACHE_TTL: Duration = Duration::from_secs(60);

/// Content source chosen from the endpoint scheme.
pub enum CliSource {
    File(FileSource),
    GraphQl(CachedSource<GraphQlSource>),
}

impl CliSource {
    /// Open the source for `endpoint`, or for the environment's endpoint when
    /// none is given.
    ///
    /// `file://` endpoints read fixtures from disk and need no credentials.
    /// Missing credentials for a network endpoint are reported by the first
    /// fetch.
    pub fn open(endpoint: Option<&str>) -> Result<Self> {
        let mut config = ContentConfig::from_env().context("Invalid content configuration")?;
        if let Some(endpoint) = endpoint {
            let url = EndpointUrl::new(endpoint).context("Invalid endpoint URL")?;
            config = config.with_endpoint(url);
        }

        let url = config.endpoint();
        if url.is_local() {
            let path = url
                .to_file_path()
                .context("Failed to convert file:// URL to path")?;
            debug!(path = %path.display(), "Using fixture directory");
            Ok(CliSource::File(FileSource::new(path)))
        } else {
            debug!(endpoint = %url, "Using GraphQL endpoint");
            let source = GraphQlSource::new(config).context("Failed to create content client")?;
            Ok(CliSource::GraphQl(CachedSource::new(source, CACHE_TTL)))
        }
    }
}

#[async_trait]
impl ContentSource for CliSource {
    async fn fetch_collection(
        &self,
        kind: CollectionKind,
        query: &QueryParams,
        preview: bool,
    ) -> folio_core::Result<Collection> {
        match self {
            CliSource::File(source) => source.fetch_collection(kind, query, preview).await,
            CliSource::GraphQl(source) => source.fetch_collection(kind, query, preview).await,
        }
    }

    async fn fetch_entry(
        &self,
        kind: CollectionKind,
        slug: &str,
        preview: bool,
    ) -> folio_core::Result<Option<ContentEntry>> {
        match self {
            CliSource::File(source) => source.fetch_entry(kind, slug, preview).await,
            CliSource::GraphQl(source) => source.fetch_entry(kind, slug, preview).await,
        }
    }
}
