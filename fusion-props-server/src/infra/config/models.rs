use std::fmt;
use std::path::PathBuf;

use fusion_props_core::FusionDataConfig;
use url::Url;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PLACEHOLDER_THUMBNAIL: &str = "/images/box-200x200.png";

/// Fully resolved server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub fusion: FusionConfig,
    pub cors: CorsConfig,
    pub thumbnails: ThumbnailConfig,
    pub metadata: ConfigMetadata,
}

impl Config {
    /// Minimal configuration for an upstream endpoint, defaults elsewhere.
    pub fn for_endpoint(graphql_url: Url) -> Self {
        Self {
            server: ServerConfig::default(),
            fusion: FusionConfig {
                graphql_url,
                service_token: None,
            },
            cors: CorsConfig::default(),
            thumbnails: ThumbnailConfig::default(),
            metadata: ConfigMetadata::default(),
        }
    }

    pub fn fusion_data(&self) -> FusionDataConfig {
        FusionDataConfig::new(self.fusion.graphql_url.clone())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Upstream endpoint and the optional server-held credential.
#[derive(Clone)]
pub struct FusionConfig {
    pub graphql_url: Url,
    pub service_token: Option<String>,
}

impl fmt::Debug for FusionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FusionConfig")
            .field("graphql_url", &self.graphql_url.as_str())
            .field("has_service_token", &self.service_token.is_some())
            .finish()
    }
}

/// Empty `allowed_origins` means any origin.
#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ThumbnailConfig {
    /// Redirect target when a file-version thumbnail cannot be resolved.
    pub placeholder: String,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER_THUMBNAIL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
