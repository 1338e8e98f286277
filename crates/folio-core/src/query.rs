//! Query parameters for collection fetches.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Result;
use crate::error::{Error, InvalidInputError};
use crate::types::{Category, ItemId};

/// Publication-date ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Most recent first.
    #[default]
    Newest,
    /// Oldest first.
    Oldest,
}

impl SortOrder {
    /// Returns the opposite order.
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Newest => SortOrder::Oldest,
            SortOrder::Oldest => SortOrder::Newest,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            _ => Err(InvalidInputError::SortOrder {
                value: s.to_string(),
            }
            .into()),
        }
    }
}

/// Optional restrictions on a collection query.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct QueryFilter {
    /// Only items in this category.
    pub category: Option<Category>,
    /// Omit the item with this id (the featured item).
    pub exclude_id: Option<ItemId>,
}

/// Parameters of a single collection request.
///
/// Built per request and never mutated; the `with_*` methods return a new
/// value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QueryParams {
    limit: u32,
    skip: u32,
    filter: QueryFilter,
    sort: SortOrder,
}

impl QueryParams {
    /// Create parameters for the first page of `limit` items.
    ///
    /// # Errors
    ///
    /// Returns an error if `limit` is zero.
    pub fn new(limit: u32) -> Result<Self> {
        if limit == 0 {
            return Err(InvalidInputError::ZeroLimit.into());
        }
        Ok(Self {
            limit,
            skip: 0,
            filter: QueryFilter::default(),
            sort: SortOrder::default(),
        })
    }

    pub fn with_skip(mut self, skip: u32) -> Self {
        self.skip = skip;
        self
    }

    pub fn with_category(mut self, category: Option<Category>) -> Self {
        self.filter.category = category;
        self
    }

    pub fn excluding(mut self, id: Option<ItemId>) -> Self {
        self.filter.exclude_id = id;
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn skip(&self) -> u32 {
        self.skip
    }

    pub fn filter(&self) -> &QueryFilter {
        &self.filter
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    /// Parameters for the page following this one.
    pub fn next_page(&self) -> Self {
        self.clone().with_skip(self.skip.saturating_add(self.limit))
    }
}
