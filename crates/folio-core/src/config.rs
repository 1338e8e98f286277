//! Content endpoint configuration.
//!
//! Values are read once at startup. Missing credentials do not fail
//! construction; they surface as [`ConfigError::MissingVar`] from the first
//! fetch that needs them.

use std::fmt;

use crate::Result;
use crate::error::ConfigError;
use crate::tokens::AccessToken;
use crate::types::EndpointUrl;

/// Environment variable holding the CMS space identifier.
pub const SPACE_ID_VAR: &str = "CONTENTFUL_SPACE_ID";
/// Environment variable holding the CMS environment name.
pub const ENVIRONMENT_VAR: &str = "CONTENTFUL_ENVIRONMENT";
/// Environment variable holding the delivery (published content) token.
pub const ACCESS_TOKEN_VAR: &str = "CONTENTFUL_ACCESS_TOKEN";
/// Environment variable holding the preview (draft content) token.
pub const PREVIEW_TOKEN_VAR: &str = "CONTENTFUL_PREVIEW_ACCESS_TOKEN";
/// Environment variable overriding the GraphQL base URL.
pub const ENDPOINT_VAR: &str = "CONTENTFUL_ENDPOINT";

/// Default GraphQL base URL.
pub const DEFAULT_ENDPOINT: &str = "https://graphql.contentful.com";
/// Default CMS environment.
pub const DEFAULT_ENVIRONMENT: &str = "master";

/// Configuration for a content source.
#[derive(Clone)]
pub struct ContentConfig {
    endpoint: EndpointUrl,
    space_id: Option<String>,
    environment: String,
    delivery_token: Option<AccessToken>,
    preview_token: Option<AccessToken>,
}

impl ContentConfig {
    /// Create a configuration with every credential set explicitly.
    pub fn new(
        endpoint: EndpointUrl,
        space_id: impl Into<String>,
        delivery_token: AccessToken,
        preview_token: Option<AccessToken>,
    ) -> Self {
        Self {
            endpoint,
            space_id: Some(space_id.into()),
            environment: DEFAULT_ENVIRONMENT.to_string(),
            delivery_token: Some(delivery_token),
            preview_token,
        }
    }

    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Fails only if the endpoint override is not a valid URL.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary lookup function.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let endpoint = match get(ENDPOINT_VAR) {
            Some(url) => EndpointUrl::new(&url)?,
            None => EndpointUrl::new(DEFAULT_ENDPOINT)?,
        };

        Ok(Self {
            endpoint,
            space_id: get(SPACE_ID_VAR),
            environment: get(ENVIRONMENT_VAR).unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            delivery_token: get(ACCESS_TOKEN_VAR).map(AccessToken::new),
            preview_token: get(PREVIEW_TOKEN_VAR).map(AccessToken::new),
        })
    }

    /// Replace the endpoint.
    pub fn with_endpoint(mut self, endpoint: EndpointUrl) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Replace the CMS environment name.
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    /// Returns the configured endpoint.
    pub fn endpoint(&self) -> &EndpointUrl {
        &self.endpoint
    }

    /// Returns the CMS environment name.
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Returns the space identifier.
    pub fn space_id(&self) -> Result<&str> {
        self.space_id.as_deref().ok_or_else(|| {
            ConfigError::MissingVar {
                name: SPACE_ID_VAR,
            }
            .into()
        })
    }

    /// Returns the token for the requested delivery mode.
    pub fn token(&self, preview: bool) -> Result<&AccessToken> {
        let (token, name) = if preview {
            (self.preview_token.as_ref(), PREVIEW_TOKEN_VAR)
        } else {
            (self.delivery_token.as_ref(), ACCESS_TOKEN_VAR)
        };
        token.ok_or_else(|| ConfigError::MissingVar { name }.into())
    }

    /// Returns the full GraphQL URL for the configured space and environment.
    pub fn graphql_url(&self) -> Result<String> {
        Ok(self
            .endpoint
            .graphql_url(self.space_id()?, &self.environment))
    }
}

impl fmt::Debug for ContentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("space_id", &self.space_id)
            .field("environment", &self.environment)
            .field("delivery_token", &self.delivery_token)
            .field("preview_token", &self.preview_token)
            .finish()
    }
}
