//! Error types for folio.
//!
//! Every failure a content source can produce is classified into one of the
//! variants of [`Error`] before it reaches the caller.

use std::fmt;
use thiserror::Error;

/// The unified error type for folio operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport failures: non-2xx responses, connection errors, timeouts.
    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    /// The content service answered but reported query-level errors.
    #[error("GraphQL error: {0}")]
    GraphQl(#[from] GraphQlError),

    /// Unexpected response shapes and anything else that went wrong while
    /// processing a response.
    #[error("content error: {0}")]
    Content(#[from] ContentError),

    /// Missing or malformed configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid caller input (query parameters, identifiers, URLs).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns true if retrying the same request may succeed.
    ///
    /// Only transport failures qualify, and client errors (4xx) are excluded
    /// since the same request will be rejected again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Network(NetworkError::Status { status, .. }) => !(400..500).contains(status),
            Error::Network(_) => true,
            Error::GraphQl(_) | Error::Content(_) | Error::Config(_) | Error::InvalidInput(_) => {
                false
            }
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}{}", body_suffix(.body))]
    Status { status: u16, body: Option<String> },

    /// Connection could not be established.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Any other HTTP client failure.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl NetworkError {
    /// Returns the HTTP status, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            NetworkError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn body_suffix(body: &Option<String>) -> String {
    match body.as_deref() {
        Some(b) if !b.is_empty() => format!(": {}", b),
        _ => String::new(),
    }
}

/// Query-level errors reported by the GraphQL service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphQlError {
    /// Every message from the response's `errors` list, in order.
    pub messages: Vec<String>,
}

impl GraphQlError {
    /// Create a new GraphQL error from a list of messages.
    pub fn new(messages: Vec<String>) -> Self {
        Self { messages }
    }
}

impl fmt::Display for GraphQlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.messages.is_empty() {
            return write!(f, "unspecified error");
        }
        write!(f, "{}", self.messages.join("; "))
    }
}

impl std::error::Error for GraphQlError {}

/// Errors about the shape or processing of a content response.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The response had no `data` object.
    #[error("response contained no data")]
    MissingData,

    /// The expected collection field was absent or null.
    #[error("missing expected collection '{field}'")]
    MissingCollection { field: String },

    /// The response body could not be decoded.
    #[error("failed to decode response: {message}")]
    Decode { message: String },

    /// A content block carried a `__typename` this crate does not know.
    #[error("unknown content block kind '{typename}'")]
    UnknownBlock { typename: String },

    /// Local content storage could not be read.
    #[error("storage error: {message}")]
    Storage { message: String },

    /// Anything else.
    #[error("{message}")]
    Other { message: String },
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable was not set.
    #[error("missing required variable {name}")]
    MissingVar { name: &'static str },

    /// A variable was set to an unusable value.
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Query limit must be positive.
    #[error("query limit must be greater than zero")]
    ZeroLimit,

    /// Invalid item identifier.
    #[error("invalid item id '{value}': {reason}")]
    ItemId { value: String, reason: String },

    /// Unknown category name.
    #[error("unknown category '{value}'")]
    Category { value: String },

    /// Unknown collection kind.
    #[error("unknown collection kind '{value}'")]
    CollectionKind { value: String },

    /// Invalid sort order.
    #[error("invalid sort order '{value}' (expected 'newest' or 'oldest')")]
    SortOrder { value: String },

    /// Invalid endpoint URL.
    #[error("invalid endpoint URL '{value}': {reason}")]
    EndpointUrl { value: String, reason: String },

    /// Invalid scroll breakpoint table.
    #[error("invalid breakpoints: {reason}")]
    Breakpoints { reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
