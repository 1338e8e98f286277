//! Content endpoint URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated content endpoint base URL.
///
/// Network endpoints (HTTPS, or HTTP for localhost) point at a GraphQL
/// content API. `file://` endpoints point at a local fixture directory and
/// are served by the filesystem content source.
///
/// # Example
///
/// ```
/// use folio_core::EndpointUrl;
///
/// let api = EndpointUrl::new("https://graphql.contentful.com").unwrap();
/// assert_eq!(
///     api.graphql_url("abc123", "master"),
///     "https://graphql.contentful.com/content/v1/spaces/abc123/environments/master"
/// );
///
/// let local = EndpointUrl::new("file:///tmp/site-content").unwrap();
/// assert!(local.is_local());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EndpointUrl(Url);

impl EndpointUrl {
    /// Create a new endpoint URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or uses an unsupported scheme.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::EndpointUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Returns the GraphQL URL for a space and environment.
    pub fn graphql_url(&self, space_id: &str, environment: &str) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        format!(
            "{}/content/v1/spaces/{}/environments/{}",
            base, space_id, environment
        )
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    /// Returns true if this is a local fixture directory (file:// URL).
    pub fn is_local(&self) -> bool {
        self.0.scheme() == "file"
    }

    /// Returns the filesystem path for file:// URLs.
    pub fn to_file_path(&self) -> Option<PathBuf> {
        if self.is_local() {
            self.0.to_file_path().ok()
        } else {
            None
        }
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        let invalid = |reason: &str| -> Error {
            InvalidInputError::EndpointUrl {
                value: original.to_string(),
                reason: reason.to_string(),
            }
            .into()
        };

        if url.cannot_be_a_base() {
            return Err(invalid("must be an absolute URL"));
        }

        let scheme = url.scheme();
        if scheme == "file" {
            if url.path().is_empty() {
                return Err(invalid("file:// URL must have a path"));
            }
            return Ok(());
        }

        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "[::1]");

        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(invalid("must use HTTPS (HTTP allowed only for localhost)"));
        }

        if url.host_str().is_none() {
            return Err(invalid("must have a host"));
        }

        Ok(())
    }
}

impl fmt::Display for EndpointUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EndpointUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for EndpointUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for EndpointUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        EndpointUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graphql_url_ignores_trailing_slash() {
        let endpoint = EndpointUrl::new("https://graphql.contentful.com/").unwrap();
        assert_eq!(
            endpoint.graphql_url("space", "master"),
            "https://graphql.contentful.com/content/v1/spaces/space/environments/master"
        );
    }

    #[test]
    fn localhost_http_allowed() {
        let endpoint = EndpointUrl::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(endpoint.host(), Some("127.0.0.1"));
        assert!(!endpoint.is_local());
    }

    #[test]
    fn remote_http_rejected() {
        assert!(EndpointUrl::new("http://graphql.contentful.com").is_err());
    }

    #[test]
    fn relative_url_rejected() {
        assert!(EndpointUrl::new("/content/v1").is_err());
    }

    #[test]
    fn file_url_maps_to_path() {
        let endpoint = EndpointUrl::new("file:///tmp/site-content").unwrap();
        assert!(endpoint.is_local());
        #[cfg(unix)]
        assert_eq!(
            endpoint.to_file_path().unwrap(),
            PathBuf::from("/tmp/site-content")
        );
    }
}
