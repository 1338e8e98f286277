//! GraphQL documents, variables and response shapes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::warn;

use folio_core::error::ContentError;
use folio_core::{
    CollectionKind, ContentBlock, ContentEntry, ContentItem, ImageRef, ItemId, QueryParams,
    Result, SortOrder,
};

/// Upper bound on body blocks fetched with a single entry.
const BODY_BLOCK_LIMIT: u32 = 50;

/// Fields selected for every grid item.
const ITEM_FIELDS: &str = "sys { id publishedAt } title slug category publishedDate \
                           thumbnail { url title width height } excerpt";

/// Fields selected for every body block.
const BLOCK_FIELDS: &str = "__typename \
    ... on BlockRichText { document: body { json } } \
    ... on BlockImage { image { url title width height } caption } \
    ... on BlockQuote { text attribution } \
    ... on BlockVideo { url caption } \
    ... on BlockGallery { images: imagesCollection { items { url title width height } } }";

/// Document for one page of a collection.
pub(crate) fn collection_query(kind: CollectionKind) -> String {
    let ty = kind.type_name();
    let field = kind.collection_field();
    format!(
        "query {ty}Grid($limit: Int!, $skip: Int!, $preview: Boolean, \
         $where: {ty}Filter, $order: [{ty}Order]) {{ \
         {field}(limit: $limit, skip: $skip, preview: $preview, where: $where, order: $order) {{ \
         total skip limit items {{ {ITEM_FIELDS} }} }} }}"
    )
}

/// Document for a single entry looked up by slug.
pub(crate) fn entry_query(kind: CollectionKind) -> String {
    let ty = kind.type_name();
    let field = kind.collection_field();
    format!(
        "query {ty}BySlug($slug: String!, $preview: Boolean) {{ \
         {field}(limit: 1, preview: $preview, where: {{ slug: $slug }}) {{ \
         total skip limit items {{ {ITEM_FIELDS} \
         bodyCollection(limit: {BODY_BLOCK_LIMIT}) {{ items {{ {BLOCK_FIELDS} }} }} }} }} }}"
    )
}

/// Variables of [`collection_query`].
#[derive(Debug, Serialize)]
pub(crate) struct CollectionVariables {
    limit: u32,
    skip: u32,
    preview: bool,
    #[serde(rename = "where")]
    filter: Value,
    order: Vec<&'static str>,
}

impl CollectionVariables {
    pub(crate) fn new(query: &QueryParams, preview: bool) -> Self {
        let mut filter = Map::new();
        if let Some(category) = query.filter().category {
            filter.insert("category".to_string(), json!(category.as_str()));
        }
        if let Some(id) = &query.filter().exclude_id {
            filter.insert("sys".to_string(), json!({ "id_not": id.as_str() }));
        }

        // sys.id breaks ties so that pages never overlap or skip items.
        let order = match query.sort() {
            SortOrder::Newest => vec!["publishedDate_DESC", "sys_id_ASC"],
            SortOrder::Oldest => vec!["publishedDate_ASC", "sys_id_ASC"],
        };

        Self {
            limit: query.limit(),
            skip: query.skip(),
            preview,
            filter: Value::Object(filter),
            order,
        }
    }
}

/// Variables of [`entry_query`].
#[derive(Debug, Serialize)]
pub(crate) struct EntryVariables<'a> {
    pub slug: &'a str,
    pub preview: bool,
}

/// A collection as returned by the API.
#[derive(Debug, Deserialize)]
pub(crate) struct CollectionPage {
    #[serde(default)]
    pub total: u32,
    /// Unresolvable entries come back as `null`.
    #[serde(default)]
    pub items: Vec<Option<EntryDto>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SysDto {
    pub id: String,
    #[serde(default)]
    pub published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EntryDto {
    pub sys: SysDto,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub published_date: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<ImageRef>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub body_collection: Option<BlockPage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BlockPage {
    #[serde(default)]
    pub items: Vec<Value>,
}

impl EntryDto {
    /// Convert to a grid item. Returns `None` for entries without a usable id.
    pub(crate) fn into_item(self) -> Option<ContentItem> {
        let id = match ItemId::new(self.sys.id) {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "Skipping entry with invalid id");
                return None;
            }
        };

        let published_at = self
            .published_date
            .as_deref()
            .and_then(parse_timestamp)
            .or_else(|| self.sys.published_at.as_deref().and_then(parse_timestamp));

        Some(ContentItem {
            id,
            category: self.category.and_then(|c| c.parse().ok()),
            published_at,
            title: self.title.unwrap_or_default(),
            slug: self.slug.unwrap_or_default(),
            image: self.thumbnail,
            excerpt: self.excerpt,
        })
    }

    /// Convert to an entry with body blocks.
    pub(crate) fn into_entry(mut self) -> Result<Option<ContentEntry>> {
        let blocks = self.body_collection.take().map(|b| b.items).unwrap_or_default();
        let Some(item) = self.into_item() else {
            return Ok(None);
        };

        let body = blocks
            .into_iter()
            .map(|raw| ContentBlock::from_value(lift_collection_items(raw)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(ContentEntry { item, body }))
    }
}

/// Remove the collection field from a `data` object and decode it.
pub(crate) fn take_collection(data: &mut Map<String, Value>, field: &str) -> Result<CollectionPage> {
    match data.remove(field) {
        None | Some(Value::Null) => Err(ContentError::MissingCollection {
            field: field.to_string(),
        }
        .into()),
        Some(value) => serde_json::from_value(value).map_err(|e| {
            ContentError::Decode {
                message: format!("{}: {}", field, e),
            }
            .into()
        }),
    }
}

/// Nested collections arrive as `{ "items": [...] }`; blocks expect the bare
/// list.
fn lift_collection_items(mut block: Value) -> Value {
    if let Some(images) = block.get_mut("images")
        && let Some(items) = images.get_mut("items").map(Value::take)
    {
        *images = items;
    }
    block
}

/// Parse an RFC 3339 timestamp or a bare date. Unparseable values are
/// treated as missing.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
