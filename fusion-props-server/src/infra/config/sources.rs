use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub server: FileServerConfig,
    #[serde(default)]
    pub fusion: FileFusionConfig,
    #[serde(default)]
    pub cors: FileCorsConfig,
    #[serde(default)]
    pub thumbnails: FileThumbnailConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

/// The service token itself never lives in the file, only a path to it.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileFusionConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graphql_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_token_file: Option<PathBuf>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileCorsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_origins: Option<Vec<String>>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileThumbnailConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

/// Environment-derived configuration values.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub server_host: Option<String>,
    /// Unparsed; the loader rejects values that are not a port number.
    pub server_port: Option<String>,
    pub graphql_url: Option<String>,
    pub service_token: Option<String>,
    pub service_token_file: Option<PathBuf>,
    pub cors_allowed_origins: Option<Vec<String>>,
    pub placeholder_thumbnail: Option<String>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads every key through `lookup`, so tests can supply a map instead
    /// of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty =
            |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        Self {
            config_path: non_empty("FUSION_PROPS_CONFIG").map(PathBuf::from),
            server_host: non_empty("SERVER_HOST"),
            server_port: non_empty("SERVER_PORT")
                .or_else(|| non_empty("PORT"))
                .map(|raw| raw.trim().to_string()),
            graphql_url: non_empty("GRAPHQL_URL"),
            service_token: non_empty("APS_SERVICE_TOKEN"),
            service_token_file: non_empty("APS_SERVICE_TOKEN_FILE")
                .map(PathBuf::from),
            cors_allowed_origins: non_empty("CORS_ALLOWED_ORIGINS")
                .map(|raw| parse_csv(&raw)),
            placeholder_thumbnail: non_empty("PLACEHOLDER_THUMBNAIL"),
        }
    }
}

fn parse_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|part| {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> EnvConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn server_port_wins_over_port() {
        let config = env(&[("PORT", "8080"), ("SERVER_PORT", "9090")]);
        assert_eq!(config.server_port.as_deref(), Some("9090"));
    }

    #[test]
    fn port_is_accepted_alone() {
        assert_eq!(env(&[("PORT", "8080")]).server_port.as_deref(), Some("8080"));
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = env(&[("APS_SERVICE_TOKEN", "  "), ("GRAPHQL_URL", "")]);
        assert!(config.service_token.is_none());
        assert!(config.graphql_url.is_none());
    }

    #[test]
    fn origins_are_split_and_trimmed() {
        let config = env(&[(
            "CORS_ALLOWED_ORIGINS",
            "http://localhost:3000, https://app.test ,,",
        )]);
        assert_eq!(
            config.cors_allowed_origins,
            Some(vec![
                "http://localhost:3000".to_string(),
                "https://app.test".to_string()
            ])
        );
    }
}
