use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;
use url::Url;

use super::{
    models::{
        Config, ConfigMetadata, ConfigWarnings, CorsConfig, DEFAULT_HOST,
        DEFAULT_PLACEHOLDER_THUMBNAIL, DEFAULT_PORT, FusionConfig,
        ServerConfig, ThumbnailConfig,
    },
    sources::{EnvConfig, FileConfig, FileFusionConfig},
};

const DEFAULT_CONFIG_LOCATIONS: &[&str] =
    &["fusion-props.toml", "config/fusion-props.toml"];

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    /// Loads `.env`, the process environment and the optional TOML file.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };

        self.load_with_env(EnvConfig::gather(), env_file_loaded)
    }

    /// Same as [`ConfigLoader::load`] with an already gathered environment.
    pub fn load_with_env(
        &self,
        env_config: EnvConfig,
        env_file_loaded: bool,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env_config)?;
        let (config, warnings) = self.compose_config(
            file_config,
            env_config,
            config_path,
            env_file_loaded,
        )?;

        Ok(ConfigLoad { config, warnings })
    }

    fn load_file_config(
        &self,
        env_config: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let mut source = ConfigPathSource::default();

        if let Some(explicit) = &self.options.config_path {
            source.explicit = Some(explicit.clone());
        } else if let Some(from_env) = &env_config.config_path {
            source.env = Some(from_env.clone());
        }

        if source.is_empty() {
            source.default = DEFAULT_CONFIG_LOCATIONS
                .iter()
                .map(PathBuf::from)
                .find(|candidate| candidate.exists());
        }

        let Some((path, provenance)) = source.resolved_path() else {
            return Ok((None, None));
        };

        if !path.exists() {
            if provenance.is_explicit() {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            return Ok((None, None));
        }

        let contents =
            fs::read_to_string(&path).map_err(|err| ConfigLoadError::Io {
                path: path.clone(),
                source: err,
            })?;
        let file_config: FileConfig =
            toml::from_str(&contents).map_err(|err| ConfigLoadError::Parse {
                path: path.clone(),
                source: err,
            })?;

        Ok((Some(file_config), Some(path)))
    }

    fn compose_config(
        &self,
        file_config: Option<FileConfig>,
        env: EnvConfig,
        config_path: Option<PathBuf>,
        env_file_loaded: bool,
    ) -> Result<(Config, ConfigWarnings), ConfigLoadError> {
        let mut warnings = ConfigWarnings::default();

        if config_path.is_none() {
            warnings.push_with_hint(
                "No fusion-props.toml detected; falling back to environment variables",
                "Create fusion-props.toml or pass --config to pin server settings",
            );
        }

        let FileConfig {
            server: file_server,
            fusion: file_fusion,
            cors: file_cors,
            thumbnails: file_thumbnails,
        } = file_config.unwrap_or_default();

        let env_port = env
            .server_port
            .as_deref()
            .map(|raw| {
                raw.parse::<u16>().map_err(|source| ConfigLoadError::InvalidPort {
                    value: raw.to_string(),
                    source,
                })
            })
            .transpose()?;

        let server = ServerConfig {
            host: env
                .server_host
                .clone()
                .or(file_server.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: env_port.or(file_server.port).unwrap_or(DEFAULT_PORT),
        };

        let raw_url = env
            .graphql_url
            .clone()
            .or(file_fusion.graphql_url.clone())
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigLoadError::MissingGraphqlUrl)?;
        let graphql_url = Url::parse(raw_url.trim()).map_err(|source| {
            ConfigLoadError::InvalidGraphqlUrl {
                value: raw_url.clone(),
                source,
            }
        })?;

        let service_token = Self::resolve_service_token(&env, &file_fusion)?;
        if service_token.is_none() {
            warnings.push_with_hint(
                "APS_SERVICE_TOKEN not configured; collection and definition routes use the caller's token",
                "Set APS_SERVICE_TOKEN or APS_SERVICE_TOKEN_FILE to manage definitions with an application credential",
            );
        }

        let cors = CorsConfig {
            allowed_origins: env
                .cors_allowed_origins
                .or(file_cors.allowed_origins)
                .unwrap_or_default(),
        };

        let thumbnails = ThumbnailConfig {
            placeholder: env
                .placeholder_thumbnail
                .or(file_thumbnails.placeholder)
                .unwrap_or_else(|| DEFAULT_PLACEHOLDER_THUMBNAIL.to_string()),
        };

        let config = Config {
            server,
            fusion: FusionConfig {
                graphql_url,
                service_token,
            },
            cors,
            thumbnails,
            metadata: ConfigMetadata {
                config_path,
                env_file_loaded,
            },
        };

        Ok((config, warnings))
    }

    fn resolve_service_token(
        env: &EnvConfig,
        file_fusion: &FileFusionConfig,
    ) -> Result<Option<String>, ConfigLoadError> {
        if let Some(token) = env.service_token.clone() {
            return Ok(Some(token.trim().to_string()));
        }

        for path in [
            env.service_token_file.as_ref(),
            file_fusion.service_token_file.as_ref(),
        ]
        .into_iter()
        .flatten()
        {
            if let Some(secret) = Self::read_secret_file(path)? {
                return Ok(Some(secret));
            }
        }

        Ok(None)
    }

    fn read_secret_file(
        path: &Path,
    ) -> Result<Option<String>, ConfigLoadError> {
        let contents = fs::read_to_string(path).map_err(|source| {
            ConfigLoadError::SecretFileIo {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let trimmed = contents.trim();
        if trimmed.is_empty() {
            Ok(None)
        } else {
            Ok(Some(trimmed.to_string()))
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("GRAPHQL_URL is not set")]
    MissingGraphqlUrl,
    #[error("GRAPHQL_URL {value:?} is not a valid URL")]
    InvalidGraphqlUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("SERVER_PORT {value:?} is not a valid port")]
    InvalidPort {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("failed to read secret file {path}")]
    SecretFileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}

#[derive(Debug, Default)]
struct ConfigPathSource {
    explicit: Option<PathBuf>,
    env: Option<PathBuf>,
    default: Option<PathBuf>,
}

impl ConfigPathSource {
    fn is_empty(&self) -> bool {
        self.explicit.is_none() && self.env.is_none() && self.default.is_none()
    }

    fn resolved_path(&self) -> Option<(PathBuf, ConfigPathProvenance)> {
        if let Some(path) = &self.explicit {
            return Some((path.clone(), ConfigPathProvenance::Explicit));
        }
        if let Some(path) = &self.env {
            return Some((path.clone(), ConfigPathProvenance::Env));
        }
        if let Some(path) = &self.default {
            return Some((path.clone(), ConfigPathProvenance::Default));
        }
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigPathProvenance {
    Explicit,
    Env,
    Default,
}

impl ConfigPathProvenance {
    fn is_explicit(self) -> bool {
        matches!(
            self,
            ConfigPathProvenance::Explicit | ConfigPathProvenance::Env
        )
    }
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn env_with_url() -> EnvConfig {
        EnvConfig {
            graphql_url: Some("https://developer.api.autodesk.com/mfg/graphql".into()),
            ..EnvConfig::default()
        }
    }

    #[test]
    fn missing_graphql_url_is_an_error() {
        let err = ConfigLoader::new()
            .load_with_env(EnvConfig::default(), false)
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::MissingGraphqlUrl));
    }

    #[test]
    fn invalid_graphql_url_is_an_error() {
        let env = EnvConfig {
            graphql_url: Some("not a url".into()),
            ..EnvConfig::default()
        };
        let err = ConfigLoader::new().load_with_env(env, false).unwrap_err();
        assert!(matches!(err, ConfigLoadError::InvalidGraphqlUrl { .. }));
    }

    #[test]
    fn non_numeric_port_is_an_error() {
        for raw in ["http", "70000"] {
            let env = EnvConfig {
                server_port: Some(raw.into()),
                ..env_with_url()
            };
            let err = ConfigLoader::new().load_with_env(env, false).unwrap_err();
            assert!(
                matches!(&err, ConfigLoadError::InvalidPort { value, .. } if value == raw),
                "unexpected error for {raw}: {err:?}"
            );
        }
    }

    #[test]
    fn defaults_apply_without_file() {
        let load = ConfigLoader::new()
            .load_with_env(env_with_url(), false)
            .unwrap();

        assert_eq!(load.config.server.host, "0.0.0.0");
        assert_eq!(load.config.server.port, 3000);
        assert_eq!(load.config.thumbnails.placeholder, "/images/box-200x200.png");
        assert!(load.config.fusion.service_token.is_none());
        assert_eq!(load.warnings.items.len(), 2);
    }

    #[test]
    fn env_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fusion-props.toml");
        fs::write(
            &path,
            r#"
[server]
host = "127.0.0.1"
port = 4000

[fusion]
graphql_url = "https://file.test/graphql"

[thumbnails]
placeholder = "/static/none.png"
"#,
        )
        .unwrap();

        let env = EnvConfig {
            server_port: Some("5000".into()),
            ..env_with_url()
        };
        let load = ConfigLoader::new()
            .with_config_path(&path)
            .load_with_env(env, false)
            .unwrap();

        assert_eq!(load.config.server.host, "127.0.0.1");
        assert_eq!(load.config.server.port, 5000);
        assert_eq!(
            load.config.fusion.graphql_url.as_str(),
            "https://developer.api.autodesk.com/mfg/graphql"
        );
        assert_eq!(load.config.thumbnails.placeholder, "/static/none.png");
        assert_eq!(load.config.metadata.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = ConfigLoader::new()
            .with_config_path(dir.path().join("absent.toml"))
            .load_with_env(env_with_url(), false)
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::MissingConfig { .. }));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fusion-props.toml");
        fs::write(&path, "[server\nport = ").unwrap();

        let err = ConfigLoader::new()
            .with_config_path(&path)
            .load_with_env(env_with_url(), false)
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::Parse { .. }));
    }

    #[test]
    fn service_token_is_read_from_secret_file() {
        let dir = TempDir::new().unwrap();
        let secret = dir.path().join("token");
        fs::write(&secret, "  service-secret\n").unwrap();

        let env = EnvConfig {
            service_token_file: Some(secret),
            ..env_with_url()
        };
        let load = ConfigLoader::new().load_with_env(env, false).unwrap();

        assert_eq!(
            load.config.fusion.service_token.as_deref(),
            Some("service-secret")
        );
        assert_eq!(load.warnings.items.len(), 1);
    }
}
