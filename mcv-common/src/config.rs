//! Configuration loading
//!
//! Bootstrap settings come from, highest priority first:
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. TOML config file (`--config`/`MCV_CONFIG`, else `<config_dir>/mcv/config.toml`)
//! 4. Compiled defaults
//!
//! Command-line and environment values are both collected by clap in the
//! binary and handed over as [`ConfigOverrides`]. A missing config file is
//! not an error; a malformed one is.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalogue::RetryPolicy;
use crate::{Error, Result};

pub const DEFAULT_PORT: u16 = 5790;
pub const DEFAULT_LIST_URL: &str =
    "https://remarkable-bombolone-51a3d9.netlify.app/.netlify/functions/movies";
pub const DEFAULT_SEARCH_URL: &str = "https://api.themoviedb.org/3/search/movie";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w342";
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "/static/placeholder.svg";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// HTTP server port
    pub port: u16,
    /// Address the viewer binds to
    pub bind_address: String,
    pub catalogue: CatalogueConfig,
    pub posters: PosterConfig,
    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_address: "127.0.0.1".to_string(),
            catalogue: CatalogueConfig::default(),
            posters: PosterConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Movie list endpoint settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatalogueConfig {
    pub list_url: String,
    /// Total fetch attempts before giving up
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        let retry = RetryPolicy::default();
        Self {
            list_url: DEFAULT_LIST_URL.to_string(),
            max_attempts: retry.max_attempts,
            initial_backoff_ms: retry.initial_backoff.as_millis() as u64,
            max_backoff_ms: retry.max_backoff.as_millis() as u64,
            request_timeout_secs: 30,
        }
    }
}

impl CatalogueConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            initial_backoff: Duration::from_millis(self.initial_backoff_ms),
            max_backoff: Duration::from_millis(self.max_backoff_ms),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// TMDB poster search settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PosterConfig {
    pub search_url: String,
    pub api_key: String,
    /// Prefix joined with each `poster_path`
    pub image_base_url: String,
    /// Image used when no poster is found
    pub placeholder_image: String,
    pub request_timeout_secs: u64,
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            api_key: String::new(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
    pub bind_address: Option<String>,
    pub list_url: Option<String>,
    pub tmdb_api_key: Option<String>,
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// Parse and validate TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(text)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`; a file that does not exist yields the defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(Error::Config(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Apply command-line/environment values on top of file values
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self> {
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(bind_address) = overrides.bind_address {
            self.bind_address = bind_address;
        }
        if let Some(list_url) = overrides.list_url {
            self.catalogue.list_url = list_url;
        }
        if let Some(api_key) = overrides.tmdb_api_key {
            self.posters.api_key = api_key;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.catalogue.max_attempts == 0 {
            return Err(Error::Config("catalogue.max_attempts must be at least 1".to_string()));
        }
        if self.catalogue.list_url.trim().is_empty() {
            return Err(Error::Config("catalogue.list_url must not be empty".to_string()));
        }
        if self.posters.search_url.trim().is_empty() {
            return Err(Error::Config("posters.search_url must not be empty".to_string()));
        }
        if self.posters.image_base_url.trim().is_empty() {
            return Err(Error::Config("posters.image_base_url must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Pick the config file: an explicit path wins over the platform default
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| dirs::config_dir().map(|d| d.join("mcv").join("config.toml")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TomlConfig::default();
        assert_eq!(config.port, 5790);
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.catalogue.max_attempts, 5);
        assert_eq!(config.posters.placeholder_image, "/static/placeholder.svg");
        assert!(config.posters.api_key.is_empty());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = TomlConfig::from_toml_str(
            r#"
port = 8080

[posters]
api_key = "secret"
"#,
        )
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.posters.api_key, "secret");
        assert_eq!(config.posters.search_url, DEFAULT_SEARCH_URL);
        assert_eq!(config.catalogue.list_url, DEFAULT_LIST_URL);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let result = TomlConfig::from_toml_str("port = \"not a number\"");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let result = TomlConfig::from_toml_str("[catalogue]\nmax_attempts = 0\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_retry_policy_from_config() {
        let config = CatalogueConfig {
            max_attempts: 3,
            initial_backoff_ms: 10,
            max_backoff_ms: 40,
            ..CatalogueConfig::default()
        };
        let policy = config.retry_policy();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.initial_backoff, Duration::from_millis(10));
        assert_eq!(policy.max_backoff, Duration::from_millis(40));
    }

    #[test]
    fn test_overrides_win() {
        let config = TomlConfig::default()
            .with_overrides(ConfigOverrides {
                port: Some(9000),
                tmdb_api_key: Some("cli-key".to_string()),
                ..ConfigOverrides::default()
            })
            .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.posters.api_key, "cli-key");
        assert_eq!(config.bind_address, "127.0.0.1");
    }

    #[test]
    fn test_empty_list_url_override_rejected() {
        let result = TomlConfig::default().with_overrides(ConfigOverrides {
            list_url: Some("  ".to_string()),
            ..ConfigOverrides::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_explicit_config_path_wins() {
        let explicit = PathBuf::from("/tmp/mcv-test.toml");
        assert_eq!(resolve_config_path(Some(&explicit)), Some(explicit));
    }
}
