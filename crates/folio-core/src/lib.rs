//! folio-core - Core content types, errors and view models.
//!
//! Everything that does not need a network stack lives here: the domain
//! types returned by content sources, the unified [`Error`] taxonomy,
//! environment configuration, the [`ContentSource`] trait, and the pure
//! collection view-model builder.

pub mod blocks;
pub mod config;
pub mod content;
pub mod error;
pub mod query;
pub mod tokens;
pub mod traits;
pub mod types;
pub mod view;

pub use blocks::{BlockKind, ContentBlock};
pub use config::ContentConfig;
pub use content::{Collection, ContentEntry, ContentItem, ImageRef};
pub use error::Error;
pub use query::{QueryFilter, QueryParams, SortOrder};
pub use tokens::AccessToken;
pub use traits::ContentSource;
pub use types::{Category, CollectionKind, EndpointUrl, ItemId};
pub use view::ViewState;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
