//! Configuration service implementation.
//!
//! Loads the root configuration from `config.toml`, either at an explicit
//! path or at the platform default location.

use crate::paths::ProdirPaths;
use prodir_core::config::RootConfig;
use prodir_core::error::Result;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Configuration service that loads and caches the root configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: Option<PathBuf>,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    /// Creates a service reading `path`, or the default location when `None`.
    ///
    /// The file is read lazily on first access.
    pub fn new(path: Option<&Path>) -> Self {
        Self {
            path: path.map(Path::to_path_buf),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the root configuration, loading from file if not cached.
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is
    /// an error.
    pub fn get_config(&self) -> Result<RootConfig> {
        if let Ok(read_lock) = self.config.read() {
            if let Some(cached) = read_lock.as_ref() {
                return Ok(cached.clone());
            }
        }

        let loaded = self.load_config()?;

        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    fn load_config(&self) -> Result<RootConfig> {
        let path = match &self.path {
            Some(path) => path.clone(),
            None => ProdirPaths::config_file()?,
        };

        if !path.exists() {
            tracing::debug!(
                "[ConfigService] No config at {}, using defaults",
                path.display()
            );
            return Ok(RootConfig::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: RootConfig = toml::from_str(&content)?;
        tracing::debug!("[ConfigService] Loaded config from {}", path.display());
        Ok(config)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prodir_core::config::StorageBackend;
    use prodir_core::error::ProdirError;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(Some(&temp_dir.path().join("config.toml")));
        assert_eq!(service.get_config().unwrap(), RootConfig::default());
    }

    #[test]
    fn test_loads_and_caches() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[storage]\nbackend = \"memory\"\n\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let service = ConfigService::new(Some(&path));
        let config = service.get_config().unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.logging.level, "debug");

        std::fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();
        assert_eq!(service.get_config().unwrap().logging.level, "debug");

        service.invalidate_cache();
        assert_eq!(service.get_config().unwrap().logging.level, "warn");
    }

    #[test]
    fn test_malformed_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[storage\n").unwrap();

        let err = ConfigService::new(Some(&path)).get_config().unwrap_err();
        assert!(matches!(err, ProdirError::Serialization { .. }));
    }
}
