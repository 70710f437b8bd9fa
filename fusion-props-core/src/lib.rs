//! # Fusion Props Core
//!
//! Query dispatch for the Fusion Data GraphQL API.
//!
//! - [`graphql::QueryClient`] owns one endpoint and one bearer token, posts
//!   `{query, variables}` envelopes and normalizes failures into
//!   [`FusionDataError`].
//! - [`FusionData`] exposes one method per backend capability (collections,
//!   definitions, custom properties, occurrences, id resolution,
//!   thumbnails). List operations drive the cursor loop in
//!   [`graphql::pagination`].
//!
//! Nothing here keeps state between calls beyond the token, so a fresh
//! [`FusionData`] is built for every inbound request.

pub mod config;
pub mod error;
pub mod graphql;
pub mod operations;

pub use config::FusionDataConfig;
pub use error::{FusionDataError, Result, get_error_message};
pub use graphql::{
    BinaryResource, GraphqlEnvelope, GraphqlError, PaginationMode, QueryClient, QueryDocument,
    QueryExecutor,
};
pub use operations::{FusionData, ItemVariant};

pub use fusion_props_model as model;
