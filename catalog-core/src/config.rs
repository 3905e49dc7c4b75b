//! Configuration for the catalog

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service name
    pub service_name: String,

    /// Listing validation limits
    pub validation: ValidationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: "catalog-core".to_string(),
            validation: ValidationConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())
            .map_err(|e| crate::Error::Other(format!("Cannot read config: {}", e)))?;
        toml::from_str(&raw)
            .map_err(|e| crate::Error::Other(format!("Cannot parse config: {}", e)))
    }
}

/// Validation limits for owner-submitted drafts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Maximum title length in characters
    pub max_title_len: usize,

    /// Maximum description length in characters
    pub max_description_len: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_title_len: 256,
            max_description_len: 4096,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let toml = toml::to_string(&Config::default()).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.validation.max_title_len, 256);
    }
}
