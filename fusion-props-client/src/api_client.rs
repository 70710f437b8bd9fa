use std::sync::Arc;
use std::time::Duration;

use fusion_props_model::{
    ComponentVersionProperties, CustomProperty, DrawingVersionProperties,
    ItemKind, ItemRef, Occurrence, PropertyDefinition,
    PropertyDefinitionCollection, PropertyInput, SetPropertiesResult,
    Thumbnail, VersionIds,
};
use log::{debug, info, warn};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::error::{ClientError, Result};

const API_PREFIX: [&str; 2] = ["api", "fusiondata"];

/// REST client for the property server, authenticated with the signed-in
/// user's token.
///
/// Every call takes a [`CancellationToken`]; cancelling it abandons the
/// in-flight request and yields [`ClientError::Cancelled`].
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    token_store: Arc<RwLock<Option<String>>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field(
                "has_token",
                &self
                    .token_store
                    .try_read()
                    .map(|t| t.is_some())
                    .unwrap_or(false),
            )
            .finish()
    }
}

impl ApiClient {
    /// Create a client for the server at `base_url`.
    ///
    /// A missing scheme is treated as `http://`.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Self::with_http(client, base_url)
    }

    pub fn with_http(client: Client, base_url: &str) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let with_scheme = if trimmed.starts_with("http://")
            || trimmed.starts_with("https://")
        {
            trimmed.to_string()
        } else {
            let normalized = format!("http://{trimmed}");
            warn!("[ApiClient] Normalized base URL from '{base_url}' to '{normalized}'");
            normalized
        };
        let base_url = Url::parse(&with_scheme)
            .map_err(|e| ClientError::InvalidUrl(format!("{with_scheme}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(with_scheme));
        }

        info!("[ApiClient] Creating API client for {base_url}");
        Ok(Self {
            client,
            base_url,
            token_store: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn set_token(&self, token: Option<String>) {
        *self.token_store.write().await = token;
    }

    /// Route url under `/api/fusiondata`, one path segment per element.
    /// Segments are percent-encoded, so ids and urls may contain `/`.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(API_PREFIX)
            .extend(segments);
        Ok(url)
    }

    async fn build_request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match self.token_store.read().await.as_ref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let text = response.text().await.unwrap_or_default();
        Err(ClientError::from_response(status, &text))
    }

    /// Send the request unless `cancel` fires first.
    async fn dispatch<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
        cancel: &CancellationToken,
    ) -> Result<T> {
        debug!("[ApiClient] {method} {}", url.path());

        let mut request = self.build_request(method, url).await;
        if let Some(body) = body {
            request = request.json(&body);
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ClientError::Cancelled),
            result = Self::execute(request) => result,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<Value>,
        cancel: &CancellationToken,
    ) -> Result<T> {
        let url = self.endpoint(segments)?;
        self.dispatch(method, url, body, cancel).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        cancel: &CancellationToken,
    ) -> Result<T> {
        self.send(Method::GET, segments, None, cancel).await
    }

    // Collections

    pub async fn get_collections(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<PropertyDefinitionCollection>> {
        self.get(&["collections"], cancel).await
    }

    pub async fn create_collection(
        &self,
        name: &str,
        description: &str,
        cancel: &CancellationToken,
    ) -> Result<PropertyDefinitionCollection> {
        let body = json!({ "collectionName": name, "collectionDescription": description });
        self.send(Method::POST, &["collections"], Some(body), cancel).await
    }

    pub async fn update_collection(
        &self,
        collection_id: &str,
        description: &str,
        cancel: &CancellationToken,
    ) -> Result<PropertyDefinitionCollection> {
        let body = json!({ "collectionDescription": description });
        self.send(Method::PUT, &["collections", collection_id], Some(body), cancel)
            .await
    }

    /// A rejected hub listing means the user has no admin access to the hub.
    pub async fn get_hub_collections(
        &self,
        hub_id: &str,
        minimal: bool,
        cancel: &CancellationToken,
    ) -> Result<Vec<PropertyDefinitionCollection>> {
        let mut url = self.endpoint(&[hub_id, "collections"])?;
        if minimal {
            url.query_pairs_mut().append_pair("minimal", "true");
        }
        self.dispatch(Method::GET, url, None, cancel).await
    }

    pub async fn link_collection(
        &self,
        hub_id: &str,
        collection_id: &str,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let body = json!({ "collectionId": collection_id });
        self.send(Method::POST, &[hub_id, "collections"], Some(body), cancel)
            .await
    }

    pub async fn unlink_collection(
        &self,
        hub_id: &str,
        collection_id: &str,
        cancel: &CancellationToken,
    ) -> Result<String> {
        self.send(
            Method::DELETE,
            &[hub_id, "collections", collection_id],
            None,
            cancel,
        )
        .await
    }

    // Definitions

    pub async fn get_definitions(
        &self,
        collection_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<PropertyDefinition>> {
        self.get(&["collections", collection_id, "definitions"], cancel)
            .await
    }

    pub async fn create_definition(
        &self,
        collection_id: &str,
        body: Value,
        cancel: &CancellationToken,
    ) -> Result<PropertyDefinition> {
        self.send(Method::POST, &["collections", collection_id, "definitions"], Some(body), cancel)
        .await
    }

    pub async fn get_definition(
        &self,
        definition_id: &str,
        cancel: &CancellationToken,
    ) -> Result<PropertyDefinition> {
        self.get(&["definitions", definition_id], cancel).await
    }

    pub async fn update_definition(
        &self,
        definition_id: &str,
        description: &str,
        is_hidden: bool,
        cancel: &CancellationToken,
    ) -> Result<PropertyDefinition> {
        let body = json!({ "definitionDescription": description, "isHidden": is_hidden });
        self.send(Method::PUT, &["definitions", definition_id], Some(body), cancel)
            .await
    }

    pub async fn archive_definition(
        &self,
        definition_id: &str,
        cancel: &CancellationToken,
    ) -> Result<PropertyDefinition> {
        self.send(Method::DELETE, &["definitions", definition_id], None, cancel)
            .await
    }

    // Versions

    pub async fn get_component_general_properties(
        &self,
        version_id: &str,
        cancel: &CancellationToken,
    ) -> Result<ComponentVersionProperties> {
        self.get(&["component", version_id, "generalproperties"], cancel)
            .await
    }

    pub async fn get_drawing_general_properties(
        &self,
        version_id: &str,
        cancel: &CancellationToken,
    ) -> Result<DrawingVersionProperties> {
        self.get(&["drawing", version_id, "generalproperties"], cancel)
            .await
    }

    pub async fn get_custom_properties(
        &self,
        kind: ItemKind,
        version_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<CustomProperty>> {
        self.get(&[kind.as_str(), version_id, "properties"], cancel)
            .await
    }

    pub async fn get_thumbnail(
        &self,
        kind: ItemKind,
        version_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Thumbnail> {
        self.get(&[kind.as_str(), version_id, "thumbnailUrl"], cancel)
            .await
    }

    pub async fn get_occurrences(
        &self,
        version_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Occurrence>> {
        self.get(&[version_id, "occurrences"], cancel).await
    }

    pub async fn get_all_occurrences(
        &self,
        version_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Occurrence>> {
        self.get(&[version_id, "alloccurrences"], cancel).await
    }

    // Property values

    pub async fn set_properties(
        &self,
        target_id: &str,
        properties: &[PropertyInput],
        cancel: &CancellationToken,
    ) -> Result<SetPropertiesResult> {
        let body = json!({ "properties": properties });
        self.send(Method::PUT, &[target_id, "properties"], Some(body), cancel)
            .await
    }

    pub async fn delete_property(
        &self,
        target_id: &str,
        definition_id: &str,
        cancel: &CancellationToken,
    ) -> Result<SetPropertiesResult> {
        self.send(
            Method::DELETE,
            &[target_id, "properties", definition_id],
            None,
            cancel,
        )
        .await
    }

    // Id resolution

    pub async fn get_version_id(
        &self,
        project_id: &str,
        file_version_id: &str,
        cancel: &CancellationToken,
    ) -> Result<VersionIds> {
        self.get(&[project_id, file_version_id, "versionid"], cancel)
            .await
    }

    pub async fn get_item_id(
        &self,
        project_id: &str,
        file_item_id: &str,
        cancel: &CancellationToken,
    ) -> Result<ItemRef> {
        self.get(&[project_id, file_item_id, "itemid"], cancel).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_base_url() {
        let client = ApiClient::new("localhost:3000/").unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:3000/");
    }

    #[test]
    fn endpoint_encodes_each_segment() {
        let client = ApiClient::new("http://localhost:3000").unwrap();

        let url = client
            .endpoint(&["thumbnail", "https://cdn.test/a b.png"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/api/fusiondata/thumbnail/https:%2F%2Fcdn.test%2Fa%20b.png"
        );

        let url = client.endpoint(&["urn:adsk:hub", "collections"]).unwrap();
        assert_eq!(url.path(), "/api/fusiondata/urn:adsk:hub/collections");
    }
}
