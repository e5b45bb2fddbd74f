//! Configuration: `~/.members-tui/config.json`, then environment, then CLI
//!
//! Everything resolves to a [`DataSource`] once at startup. Nothing else in
//! the crate reads the environment.

use crate::model::pagination::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const ENV_GRAPHQL_URL: &str = "MEMBERS_GRAPHQL_URL";
pub const ENV_ACCESS_TOKEN: &str = "MEMBERS_ACCESS_TOKEN";
pub const ENV_MOCK_MODE: &str = "MEMBERS_MOCK_MODE";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine home directory")]
    NoHomeDir,

    #[error("Failed to read config at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config at {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub graphql_url: Option<String>,
    pub access_token: Option<String>,
    pub mock_mode: bool,
    pub page_size: usize,
    pub request_timeout_secs: u64,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            graphql_url: None,
            access_token: None,
            mock_mode: false,
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_file: None,
        }
    }
}

/// Values given on the command line; `None` means "not given"
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub url: Option<String>,
    pub token: Option<String>,
    pub mock: bool,
    pub page_size: Option<usize>,
    pub log_file: Option<PathBuf>,
}

/// Where members come from, decided once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Mock,
    Live {
        url: String,
        token: String,
        timeout: Duration,
    },
}

impl DataSource {
    pub fn is_mock(&self) -> bool {
        matches!(self, DataSource::Mock)
    }
}

fn truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".members-tui"))
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Load from the default location; a missing file is `Ok(None)`
    pub fn load() -> Result<Option<Config>, ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoHomeDir)?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Option<Config>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(config))
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Overlay `MEMBERS_*` variables read through `lookup`
    pub fn apply_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = non_blank(lookup(ENV_GRAPHQL_URL)) {
            self.graphql_url = Some(url);
        }
        if let Some(token) = non_blank(lookup(ENV_ACCESS_TOKEN)) {
            self.access_token = Some(token);
        }
        if let Some(mock) = lookup(ENV_MOCK_MODE) {
            self.mock_mode = truthy(&mock);
        }
        self
    }

    /// Flags given on the command line win over everything else
    pub fn apply_cli_overrides(mut self, cli: &CliOverrides) -> Self {
        if let Some(url) = non_blank(cli.url.clone()) {
            self.graphql_url = Some(url);
        }
        if let Some(token) = non_blank(cli.token.clone()) {
            self.access_token = Some(token);
        }
        if cli.mock {
            self.mock_mode = true;
        }
        if let Some(size) = cli.page_size.filter(|s| *s > 0) {
            self.page_size = size;
        }
        if let Some(log_file) = &cli.log_file {
            self.log_file = Some(log_file.clone());
        }
        self
    }

    /// Page size to start with; zero falls back to the default
    pub fn initial_page_size(&self) -> usize {
        if self.page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            self.page_size
        }
    }

    /// Mock when forced, or when either the URL or the token is missing
    pub fn data_source(&self) -> DataSource {
        let url = non_blank(self.graphql_url.clone());
        let token = non_blank(self.access_token.clone());
        match (self.mock_mode, url, token) {
            (false, Some(url), Some(token)) => DataSource::Live {
                url,
                token,
                timeout: Duration::from_secs(self.request_timeout_secs.max(1)),
            },
            _ => DataSource::Mock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn live_config() -> Config {
        Config {
            graphql_url: Some("https://api.example.com/graphql".to_string()),
            access_token: Some("secret".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(loaded, None);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            page_size: 50,
            ..live_config()
        };

        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), Some(config));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"mock_mode": true}"#).unwrap();

        let config = Config::load_from(&path).unwrap().unwrap();

        assert!(config.mock_mode);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_invalid_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let config = live_config().apply_env_from(env(&[
            (ENV_GRAPHQL_URL, "https://staging.example.com/graphql"),
            (ENV_MOCK_MODE, "1"),
        ]));

        assert_eq!(
            config.graphql_url.as_deref(),
            Some("https://staging.example.com/graphql")
        );
        assert_eq!(config.access_token.as_deref(), Some("secret"));
        assert!(config.mock_mode);
    }

    #[test]
    fn test_cli_overrides_env() {
        let config = Config::default()
            .apply_env_from(env(&[(ENV_ACCESS_TOKEN, "from-env")]))
            .apply_cli_overrides(&CliOverrides {
                token: Some("from-cli".to_string()),
                page_size: Some(10),
                ..Default::default()
            });

        assert_eq!(config.access_token.as_deref(), Some("from-cli"));
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn test_data_source_requires_url_and_token() {
        assert!(Config::default().data_source().is_mock());

        let no_token = Config {
            access_token: Some("  ".to_string()),
            ..live_config()
        };
        assert!(no_token.data_source().is_mock());

        assert_eq!(
            live_config().data_source(),
            DataSource::Live {
                url: "https://api.example.com/graphql".to_string(),
                token: "secret".to_string(),
                timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            }
        );
    }

    #[test]
    fn test_forced_mock_wins_over_credentials() {
        let config = live_config().apply_cli_overrides(&CliOverrides {
            mock: true,
            ..Default::default()
        });
        assert!(config.data_source().is_mock());
    }
}
