//! Headless client for the Fusion property server.
//!
//! Drives the REST surface the way the browser UI does: a five-way
//! settled fan-out for the properties view, thumbnail polling, routing of
//! edited values to item or version, assembly flattening, hub link state
//! and create/update flows that return the draft on failure. Rendering is
//! left to the caller.

pub mod api_client;
pub mod assembly;
pub mod drafts;
pub mod error;
pub mod hub_links;
pub mod overview;
pub mod thumbnails;
pub mod writes;

pub use api_client::ApiClient;
pub use error::{ClientError, Result};
pub use overview::{Settled, VersionOverview};
pub use tokio_util::sync::CancellationToken;
