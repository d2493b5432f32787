use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::constants;
use crate::error::{IngestError, Result};

/// Runtime configuration. Every field has a default so the binary runs
/// without a config file; a present but malformed file is an error.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Emit an informational message for every mapped product. Verbose on
    /// large feeds, so it can be turned off.
    pub log_each_product: bool,
    pub timeout_seconds: u64,
    pub feeds: FeedsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedsConfig {
    pub json_url: String,
    pub xml_url: String,
    pub delimited_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_each_product: true,
            timeout_seconds: 30,
            feeds: FeedsConfig::default(),
        }
    }
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            json_url: constants::DEFAULT_JSON_FEED_URL.to_string(),
            xml_url: constants::DEFAULT_XML_FEED_URL.to_string(),
            delimited_url: constants::DEFAULT_DELIMITED_FEED_URL.to_string(),
        }
    }
}

impl Config {
    /// Load `config.toml` from the working directory, falling back to the
    /// defaults when the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("config.toml"))
    }

    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            IngestError::Config(format!("Failed to read config file '{}': {e}", path.display()))
        })?;
        toml::from_str(&content).map_err(|e| {
            IngestError::Config(format!("Failed to parse config file '{}': {e}", path.display()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.log_each_product);
        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.feeds.json_url, constants::DEFAULT_JSON_FEED_URL);
    }

    #[test]
    fn partial_document_overrides_selected_fields() {
        let config: Config = toml::from_str(
            "log_each_product = false\n[feeds]\njson_url = \"http://localhost:9000/feed\"\n",
        )
        .unwrap();
        assert!(!config.log_each_product);
        assert_eq!(config.feeds.json_url, "http://localhost:9000/feed");
        assert_eq!(config.feeds.xml_url, constants::DEFAULT_XML_FEED_URL);
    }
}
