//! folio-file - Filesystem-backed content source.
//!
//! Serves JSON fixtures from a directory so that sites and tests can run
//! without the content API. Point an endpoint at `file:///path/to/dir` to
//! select it.

mod source;
mod store;

pub use source::FileSource;
pub use store::FileStore;
