//! GraphQL-backed content source.

use std::collections::HashSet;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use folio_core::{
    Collection, CollectionKind, ContentConfig, ContentEntry, ContentItem, ContentSource,
    QueryParams, Result,
};

use crate::client::GraphQlClient;
use crate::queries::{
    CollectionVariables, EntryDto, EntryVariables, collection_query, entry_query,
    take_collection,
};

/// A content source talking to the CMS GraphQL API.
///
/// Credentials are checked when a request needs them, so a source built
/// from an incomplete environment reports the missing variable on its first
/// fetch.
#[derive(Debug, Clone)]
pub struct GraphQlSource {
    config: ContentConfig,
    client: GraphQlClient,
}

impl GraphQlSource {
    /// Create a new source for the given configuration.
    pub fn new(config: ContentConfig) -> Result<Self> {
        Ok(Self {
            config,
            client: GraphQlClient::new()?,
        })
    }

    /// Returns the configuration of this source.
    pub fn config(&self) -> &ContentConfig {
        &self.config
    }
}

#[async_trait]
impl ContentSource for GraphQlSource {
    #[instrument(skip(self, query), fields(kind = %kind, skip = query.skip(), limit = query.limit()))]
    async fn fetch_collection(
        &self,
        kind: CollectionKind,
        query: &QueryParams,
        preview: bool,
    ) -> Result<Collection> {
        let url = self.config.graphql_url()?;
        let token = self.config.token(preview)?;
        debug!(preview, "Fetching collection via GraphQL");

        let variables = CollectionVariables::new(query, preview);
        let mut data = self
            .client
            .execute(&url, &collection_query(kind), &variables, token)
            .await?;

        let page = take_collection(&mut data, kind.collection_field())?;
        let items = unique_items(page.items.into_iter().flatten().filter_map(EntryDto::into_item));

        Ok(Collection::from_page(items, page.total, query.skip()))
    }

    #[instrument(skip(self), fields(kind = %kind))]
    async fn fetch_entry(
        &self,
        kind: CollectionKind,
        slug: &str,
        preview: bool,
    ) -> Result<Option<ContentEntry>> {
        let url = self.config.graphql_url()?;
        let token = self.config.token(preview)?;
        debug!(preview, "Fetching entry via GraphQL");

        let variables = EntryVariables { slug, preview };
        let mut data = self
            .client
            .execute(&url, &entry_query(kind), &variables, token)
            .await?;

        let page = take_collection(&mut data, kind.collection_field())?;
        match page.items.into_iter().flatten().next() {
            Some(dto) => dto.into_entry(),
            None => Ok(None),
        }
    }
}

/// Keep the first occurrence of every id.
fn unique_items(items: impl Iterator<Item = ContentItem>) -> Vec<ContentItem> {
    let mut seen = HashSet::new();
    items
        .filter(|item| {
            let fresh = seen.insert(item.id.clone());
            if !fresh {
                warn!(id = %item.id, "Dropping duplicate entry");
            }
            fresh
        })
        .collect()
}
