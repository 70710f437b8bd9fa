use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, warn};
use url::Url;

use super::document::QueryDocument;
use super::envelope::GraphqlEnvelope;
use crate::config::FusionDataConfig;
use crate::error::{FusionDataError, Result};

/// Longest slice of a non-GraphQL error body kept in a transport error.
const BODY_EXCERPT_CHARS: usize = 512;

/// Seam between resource operations and the wire.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Sends one document and returns the checked envelope.
    async fn send_query(
        &self,
        document: QueryDocument,
        variables: Value,
    ) -> Result<GraphqlEnvelope>;

    /// GETs an opaque (signed) url with the bearer token attached.
    async fn fetch_bytes(&self, url: &str) -> Result<BinaryResource>;
}

/// Body of a signed resource and the content type it was served with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryResource {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// reqwest-backed GraphQL client bound to one endpoint and one token.
#[derive(Clone)]
pub struct QueryClient {
    http: Client,
    endpoint: Url,
    token: String,
}

impl fmt::Debug for QueryClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("has_token", &!self.token.is_empty())
            .finish()
    }
}

impl QueryClient {
    pub fn new(config: &FusionDataConfig, token: impl Into<String>) -> Self {
        Self::with_http(Client::new(), config, token)
    }

    /// Reuses an existing connection pool.
    pub fn with_http(
        http: Client,
        config: &FusionDataConfig,
        token: impl Into<String>,
    ) -> Self {
        Self {
            http,
            endpoint: config.graphql_url.clone(),
            token: token.into(),
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn excerpt(body: &[u8]) -> String {
    String::from_utf8_lossy(body)
        .chars()
        .take(BODY_EXCERPT_CHARS)
        .collect()
}

/// Interprets a raw GraphQL response.
///
/// Non-2xx bodies that still parse as an envelope with errors are handled
/// like any other GraphQL failure.
fn read_envelope(
    status: reqwest::StatusCode,
    body: &[u8],
) -> Result<GraphqlEnvelope> {
    let parsed = serde_json::from_slice::<GraphqlEnvelope>(body);

    match parsed {
        Ok(envelope) if status.is_success() || envelope.has_errors() => {
            Ok(envelope)
        }
        Ok(_) => Err(FusionDataError::transport_status(
            status.as_u16(),
            format!("HTTP {status}: {}", excerpt(body)),
        )),
        Err(err) if status.is_success() => Err(FusionDataError::transport_status(
            status.as_u16(),
            format!("invalid response body: {err}"),
        )),
        Err(_) => Err(FusionDataError::transport_status(
            status.as_u16(),
            format!("HTTP {status}: {}", excerpt(body)),
        )),
    }
}

#[async_trait]
impl QueryExecutor for QueryClient {
    async fn send_query(
        &self,
        document: QueryDocument,
        variables: Value,
    ) -> Result<GraphqlEnvelope> {
        debug!(operation = document.name, "sending GraphQL request");

        let response = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(&self.token)
            .json(&json!({ "query": document.text, "variables": variables }))
            .send()
            .await
            .map_err(|err| {
                warn!(operation = document.name, error = %err, "GraphQL transport failure");
                FusionDataError::from(err)
            })?;

        let status = response.status();
        let body = response.bytes().await?;

        read_envelope(status, &body)?.check(&document)
    }

    async fn fetch_bytes(&self, url: &str) -> Result<BinaryResource> {
        debug!("fetching binary resource");

        let response = self.http.get(url).bearer_auth(&self.token).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FusionDataError::transport_status(
                status.as_u16(),
                format!("HTTP {status} while fetching binary resource"),
            ));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        Ok(BinaryResource {
            content_type,
            bytes: response.bytes().await?.to_vec(),
        })
    }
}
