//! Resource operations over the Fusion Data GraphQL API.
//!
//! Each submodule owns the query documents for one area and adds methods to
//! [`FusionData`]. Methods build variables, delegate to the
//! [`QueryExecutor`], and extract the result path from the envelope.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::config::FusionDataConfig;
use crate::error::Result;
use crate::graphql::pagination::paginate;
use crate::graphql::{
    Connection, PagedDocument, PaginationMode, QueryClient, QueryDocument,
    QueryExecutor,
};

pub mod collections;
pub mod definitions;
pub mod ids;
pub mod occurrences;
pub mod properties;
pub mod thumbnails;
pub mod versions;

pub use ids::ItemVariant;

/// Resource operations bound to one token.
#[derive(Debug, Clone)]
pub struct FusionData<E = QueryClient> {
    client: E,
}

impl FusionData<QueryClient> {
    pub fn new(config: &FusionDataConfig, token: impl Into<String>) -> Self {
        Self::with_executor(QueryClient::new(config, token))
    }
}

impl<E: QueryExecutor> FusionData<E> {
    pub fn with_executor(client: E) -> Self {
        Self { client }
    }

    pub fn executor(&self) -> &E {
        &self.client
    }

    /// Single request, result read from `pointer`.
    async fn query<T: DeserializeOwned>(
        &self,
        document: QueryDocument,
        variables: Value,
        pointer: &str,
    ) -> Result<T> {
        self.client
            .send_query(document, variables)
            .await?
            .extract(pointer)
    }

    /// Collects every page of the connection found at `pointer`.
    async fn fetch_all<T: DeserializeOwned>(
        &self,
        resource: &PagedDocument,
        base: Map<String, Value>,
        pointer: &str,
        mode: PaginationMode,
    ) -> Result<Vec<T>> {
        paginate(mode, resource.first.name, |request| {
            let document = resource.select(&request);
            let variables = resource.variables(&base, &request);
            async move {
                self.client
                    .send_query(document, variables)
                    .await?
                    .extract::<Connection<T>>(pointer)
            }
        })
        .await
    }
}

/// Builds a variables map from `(name, value)` pairs.
fn vars<const N: usize>(pairs: [(&str, Value); N]) -> Map<String, Value> {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_owned(), value))
        .collect()
}
