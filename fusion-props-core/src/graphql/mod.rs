pub mod client;
pub mod document;
pub mod envelope;
pub mod pagination;

pub use client::{BinaryResource, QueryClient, QueryExecutor};
pub use document::{PagedDocument, QueryDocument};
pub use envelope::{GraphqlEnvelope, GraphqlError};
pub use pagination::{Connection, PageInfo, PageRequest, PaginationMode};

#[cfg(test)]
pub use client::MockQueryExecutor;
