//! Application configuration model.
//!
//! Loaded from `config.toml`. Every section and key is optional.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::profession::DEFAULT_PRICE_UNIT;

/// Root of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RootConfig {
    pub storage: StorageConfig,
    pub profession: ProfessionSettings,
    pub logging: LoggingConfig,
}

/// Which persistence backend to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Process-local, lost on exit
    Memory,
    /// JSON documents under `data_dir`
    #[default]
    File,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Overrides the platform data directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfessionSettings {
    /// Unit stored when a new profile does not send `priceUnit` at all
    pub default_price_unit: String,
}

impl Default for ProfessionSettings {
    fn default() -> Self {
        Self {
            default_price_unit: DEFAULT_PRICE_UNIT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter when `RUST_LOG` is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config: RootConfig = toml::from_str("").unwrap();
        assert_eq!(config, RootConfig::default());
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.profession.default_price_unit, "per-service");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_toml() {
        let config: RootConfig = toml::from_str(
            r#"
            [storage]
            backend = "memory"

            [profession]
            default_price_unit = "per-visit"
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert!(config.storage.data_dir.is_none());
        assert_eq!(config.profession.default_price_unit, "per-visit");
        assert_eq!(config.logging.level, "info");
    }
}
