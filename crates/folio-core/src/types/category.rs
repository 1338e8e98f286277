//! Content category enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// Category of an insight or work item.
///
/// The wire form is the exact variant name; matching is case-sensitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Branding,
    Strategy,
    Design,
    Digital,
    Culture,
    News,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 6] = [
        Category::Branding,
        Category::Strategy,
        Category::Design,
        Category::Digital,
        Category::Culture,
        Category::News,
    ];

    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Branding => "Branding",
            Category::Strategy => "Strategy",
            Category::Design => "Design",
            Category::Digital => "Digital",
            Category::Culture => "Culture",
            Category::News => "News",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                InvalidInputError::Category {
                    value: s.to_string(),
                }
                .into()
            })
    }
}
