//! Core content types.
//!
//! These types validate their contents at construction time so that the
//! rest of the workspace can rely on them.

mod category;
mod endpoint_url;
mod item_id;
mod kind;

pub use category::Category;
pub use endpoint_url::EndpointUrl;
pub use item_id::ItemId;
pub use kind::CollectionKind;
