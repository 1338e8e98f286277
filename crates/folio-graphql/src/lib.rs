//! folio-graphql - GraphQL-backed content source.
//!
//! [`GraphQlSource`] is the network [`ContentSource`](folio_core::ContentSource):
//! one POST per call, no retries, every failure classified into
//! [`folio_core::Error`]. [`CachedSource`] wraps any source with a
//! caller-owned TTL cache.

mod cache;
mod client;
mod queries;
mod source;

pub use cache::CachedSource;
pub use client::GraphQlClient;
pub use source::GraphQlSource;
