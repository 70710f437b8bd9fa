use std::{fmt, sync::Arc};

use fusion_props_core::{FusionData, FusionDataConfig, QueryClient};
use reqwest::Client;

use crate::infra::config::Config;

/// Shared by every request. Holds no per-user state: each handler binds a
/// fresh [`FusionData`] to the token it extracted.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    http: Client,
    fusion: Arc<FusionDataConfig>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self::with_http(config, Client::new())
    }

    pub fn with_http(config: Config, http: Client) -> Self {
        let fusion = Arc::new(config.fusion_data());
        Self {
            config: Arc::new(config),
            http,
            fusion,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resource operations bound to `token`, sharing the connection pool.
    pub fn fusion_data(&self, token: &str) -> FusionData {
        FusionData::with_executor(QueryClient::with_http(
            self.http.clone(),
            &self.fusion,
            token,
        ))
    }

    pub fn service_token(&self) -> Option<&str> {
        self.config.fusion.service_token.as_deref()
    }
}
