//! Content blocks that make up an entry body.
//!
//! The CMS tags each block with a GraphQL `__typename`. Blocks are a closed
//! union: a typename this crate does not know is an error, never a block
//! that silently renders as nothing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Result;
use crate::content::ImageRef;
use crate::error::ContentError;

/// The kind of a [`ContentBlock`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockKind {
    RichText,
    Image,
    Quote,
    Video,
    Gallery,
}

impl BlockKind {
    const ALL: [BlockKind; 5] = [
        BlockKind::RichText,
        BlockKind::Image,
        BlockKind::Quote,
        BlockKind::Video,
        BlockKind::Gallery,
    ];

    /// Returns the GraphQL typename of this kind.
    pub fn typename(&self) -> &'static str {
        match self {
            BlockKind::RichText => "BlockRichText",
            BlockKind::Image => "BlockImage",
            BlockKind::Quote => "BlockQuote",
            BlockKind::Video => "BlockVideo",
            BlockKind::Gallery => "BlockGallery",
        }
    }

    /// Look up a kind by GraphQL typename.
    pub fn from_typename(typename: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.typename() == typename)
    }
}

/// A block of an entry body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum ContentBlock {
    #[serde(rename = "BlockRichText")]
    RichText { document: Value },

    #[serde(rename = "BlockImage")]
    Image {
        image: ImageRef,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },

    #[serde(rename = "BlockQuote")]
    Quote {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attribution: Option<String>,
    },

    #[serde(rename = "BlockVideo")]
    Video {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },

    #[serde(rename = "BlockGallery")]
    Gallery { images: Vec<ImageRef> },
}

impl ContentBlock {
    /// Decode a block from its raw JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::UnknownBlock`] for unknown typenames and
    /// [`ContentError::Decode`] for known kinds with a malformed shape.
    pub fn from_value(value: Value) -> Result<Self> {
        let typename = value
            .get("__typename")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        if BlockKind::from_typename(&typename).is_none() {
            return Err(ContentError::UnknownBlock { typename }.into());
        }

        serde_json::from_value(value).map_err(|e| {
            ContentError::Decode {
                message: format!("{} block: {}", typename, e),
            }
            .into()
        })
    }

    /// Returns the kind of this block.
    pub fn kind(&self) -> BlockKind {
        match self {
            ContentBlock::RichText { .. } => BlockKind::RichText,
            ContentBlock::Image { .. } => BlockKind::Image,
            ContentBlock::Quote { .. } => BlockKind::Quote,
            ContentBlock::Video { .. } => BlockKind::Video,
            ContentBlock::Gallery { .. } => BlockKind::Gallery,
        }
    }
}
