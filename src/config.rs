//! Configuration file handling.
//!
//! # Configuration Location
//!
//! - Linux: `~/.config/jarscan/config.toml`
//! - macOS: `~/Library/Application Support/jarscan/config.toml`
//! - Windows: `%APPDATA%\jarscan\config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! search_url = "https://search.maven.org/solrsearch/select"
//! api_url = "https://snyk.io/api/v1/"
//! org_id = "my-org"
//! token_path = "/home/me/.config/configstore/snyk.json"
//! search_rows = 20
//! use_cache = true
//! cache_ttl_hours = 24
//! ```
//!
//! Command-line flags take precedence over the file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::checker::DEFAULT_API_URL;
use crate::credentials::default_token_path;
use crate::search::DEFAULT_SEARCH_URL;

/// Application configuration.
///
/// # Example
///
/// ```no_run
/// use jarscan::Config;
///
/// let config = Config::load().unwrap();
/// println!("Searching {}", config.search_url);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maven Central search endpoint.
    pub search_url: String,

    /// Root of the vulnerability scan API.
    pub api_url: String,

    /// Organization to scope scans to. The account's default org when unset.
    pub org_id: Option<String>,

    /// Credential file holding the API token.
    ///
    /// Default: `~/.config/configstore/snyk.json`
    pub token_path: Option<PathBuf>,

    /// Documents requested per search query.
    pub search_rows: u32,

    /// Whether search responses are cached on disk.
    pub use_cache: bool,

    /// How long to cache search responses, in hours.
    pub cache_ttl_hours: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            org_id: None,
            token_path: None,
            search_rows: 20,
            use_cache: true,
            cache_ttl_hours: 24,
        }
    }
}

impl Config {
    /// Loads configuration from the config file.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Returns the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("jarscan")
            .join("config.toml")
    }

    /// Credential file to read, falling back to the conventional location.
    pub fn resolved_token_path(&self) -> PathBuf {
        self.token_path.clone().unwrap_or_else(default_token_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.search_url, "https://search.maven.org/solrsearch/select");
        assert_eq!(config.api_url, "https://snyk.io/api/v1/");
        assert!(config.org_id.is_none());
        assert!(config.use_cache);
        assert_eq!(config.cache_ttl_hours, 24);
        assert_eq!(config.resolved_token_path(), default_token_path());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config = Config::from_toml(
            r#"
org_id = "123"
token_path = "/etc/jarscan/snyk.json"
use_cache = false
"#,
        )
        .unwrap();

        assert_eq!(config.org_id.as_deref(), Some("123"));
        assert_eq!(config.resolved_token_path(), PathBuf::from("/etc/jarscan/snyk.json"));
        assert!(!config.use_cache);
        assert_eq!(config.search_rows, 20);
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::from_toml("search_rows = \"many\"").is_err());
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }
}
