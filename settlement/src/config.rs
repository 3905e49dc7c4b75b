//! Configuration for the settlement protocol

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settlement engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service name
    pub service_name: String,

    /// Service version
    pub service_version: String,

    /// Notification configuration
    pub notify: NotifyConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: "settlement".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            notify: NotifyConfig::default(),
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

/// Notification mailbox configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Bounded mailbox capacity; overflow drops messages
    pub queue_capacity: usize,

    /// Template name for new-purchase notifications
    pub purchase_template: String,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 256,
            purchase_template: "transaction_created".to_string(),
        }
    }
}
