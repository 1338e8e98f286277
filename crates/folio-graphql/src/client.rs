//! GraphQL HTTP client.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, instrument, trace};

use folio_core::error::{ContentError, Error, GraphQlError, InvalidInputError, NetworkError};
use folio_core::{AccessToken, Result};

/// Default request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Request body of a GraphQL operation.
#[derive(Debug, Serialize)]
struct GraphQlRequest<'a, V> {
    query: &'a str,
    variables: &'a V,
}

/// Response envelope of a GraphQL operation.
#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphQlErrorEntry>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorEntry {
    #[serde(default)]
    message: String,
}

/// HTTP client for GraphQL operations.
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    client: reqwest::Client,
}

impl GraphQlClient {
    /// Create a new client.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(network_error)?;

        Ok(Self { client })
    }

    /// Execute one operation and return its `data` object.
    ///
    /// Non-2xx responses and transport failures become
    /// [`Error::Network`]; a non-empty `errors` list becomes
    /// [`Error::GraphQl`]; an undecodable body or missing `data` becomes
    /// [`Error::Content`].
    #[instrument(skip(self, query, token))]
    pub async fn execute<V>(
        &self,
        url: &str,
        query: &str,
        variables: &V,
        token: &AccessToken,
    ) -> Result<Map<String, Value>>
    where
        V: Serialize + std::fmt::Debug,
    {
        debug!("GraphQL request");
        trace!(?variables, "GraphQL variables");

        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, bearer(token)?)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(&GraphQlRequest { query, variables })
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        trace!(status = %status, "GraphQL response");

        if !status.is_success() {
            let body = response.text().await.ok().filter(|b| !b.is_empty());
            return Err(NetworkError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let bytes = response.bytes().await.map_err(network_error)?;
        parse_envelope(&bytes)
    }
}

/// Classify a 2xx response body.
fn parse_envelope(bytes: &[u8]) -> Result<Map<String, Value>> {
    let envelope: GraphQlResponse =
        serde_json::from_slice(bytes).map_err(|e| ContentError::Decode {
            message: e.to_string(),
        })?;

    if let Some(errors) = envelope.errors.filter(|e| !e.is_empty()) {
        let messages = errors.into_iter().map(|e| e.message).collect();
        return Err(GraphQlError::new(messages).into());
    }

    match envelope.data {
        Some(Value::Object(data)) => Ok(data),
        _ => Err(ContentError::MissingData.into()),
    }
}

fn bearer(token: &AccessToken) -> Result<HeaderValue> {
    HeaderValue::from_str(&format!("Bearer {}", token.as_str())).map_err(|_| {
        InvalidInputError::Other {
            message: "access token contains invalid header characters".to_string(),
        }
        .into()
    })
}

/// Map a reqwest failure onto the network error taxonomy.
pub(crate) fn network_error(err: reqwest::Error) -> Error {
    let err = if err.is_timeout() {
        NetworkError::Timeout
    } else if err.is_connect() {
        NetworkError::Connection {
            message: err.to_string(),
        }
    } else {
        NetworkError::Http {
            message: err.to_string(),
        }
    };
    Error::Network(err)
}
