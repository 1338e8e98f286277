//! Collection kinds served by the content API.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A paginated content collection exposed by the CMS.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    /// Blog posts and articles.
    Insights,
    /// Portfolio case studies.
    Work,
}

impl CollectionKind {
    /// Returns the GraphQL type name of a single entry.
    pub fn type_name(&self) -> &'static str {
        match self {
            CollectionKind::Insights => "Insight",
            CollectionKind::Work => "Work",
        }
    }

    /// Returns the GraphQL query field holding the collection.
    pub fn collection_field(&self) -> &'static str {
        match self {
            CollectionKind::Insights => "insightCollection",
            CollectionKind::Work => "workCollection",
        }
    }

    /// Returns the short name used in file paths and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKind::Insights => "insights",
            CollectionKind::Work => "work",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "insights" => Ok(CollectionKind::Insights),
            "work" => Ok(CollectionKind::Work),
            _ => Err(InvalidInputError::CollectionKind {
                value: s.to_string(),
            }
            .into()),
        }
    }
}
