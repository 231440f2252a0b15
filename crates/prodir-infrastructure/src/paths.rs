//! Unified path management for prodir files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/prodir/            # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/prodir/       # Data directory (file store)
//! ├── professions.json
//! └── users.json
//! ```

use prodir_core::error::ProdirError;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "prodir";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for ProdirError {
    fn from(err: PathError) -> Self {
        ProdirError::config(err.to_string())
    }
}

/// Path resolution for prodir.
///
/// An explicit base directory (from config or tests) replaces the platform
/// data directory.
#[derive(Debug, Clone, Default)]
pub struct ProdirPaths {
    base_dir: Option<PathBuf>,
}

impl ProdirPaths {
    pub fn new(base_dir: Option<&Path>) -> Self {
        Self {
            base_dir: base_dir.map(Path::to_path_buf),
        }
    }

    /// Default location of `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join("config.toml"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Directory holding the JSON collections.
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base_dir {
            Some(base) => Ok(base.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    pub fn professions_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("professions.json"))
    }

    pub fn users_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("users.json"))
    }
}
