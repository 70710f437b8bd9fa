use url::Url;

/// Upstream settings handed to every [`crate::QueryClient`].
///
/// Built once at start-up by the server's config loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FusionDataConfig {
    pub graphql_url: Url,
}

impl FusionDataConfig {
    pub fn new(graphql_url: Url) -> Self {
        Self { graphql_url }
    }
}
