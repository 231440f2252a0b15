//! Repository wiring from configuration.

use crate::json_file_repository::{JsonFileProfessionRepository, JsonFileUserRepository};
use crate::memory_repository::{MemoryProfessionRepository, MemoryUserRepository};
use crate::paths::ProdirPaths;
use prodir_core::config::{RootConfig, StorageBackend};
use prodir_core::error::Result;
use prodir_core::profession::ProfessionRepository;
use prodir_core::user::UserRepository;
use std::sync::Arc;

/// The repositories an operations engine needs.
#[derive(Clone)]
pub struct Repositories {
    pub professions: Arc<dyn ProfessionRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Repositories {
    /// Opens the backend selected by `config.storage`.
    pub fn open(config: &RootConfig) -> Result<Self> {
        let default_price_unit = config.profession.default_price_unit.clone();

        match config.storage.backend {
            StorageBackend::Memory => {
                tracing::info!("[Repositories] Using in-memory storage");
                Ok(Self {
                    professions: Arc::new(MemoryProfessionRepository::new(default_price_unit)),
                    users: Arc::new(MemoryUserRepository::new()),
                })
            }
            StorageBackend::File => {
                let paths = ProdirPaths::new(config.storage.data_dir.as_deref());
                tracing::info!(
                    "[Repositories] Using file storage at {}",
                    paths.data_dir()?.display()
                );
                Ok(Self {
                    professions: Arc::new(JsonFileProfessionRepository::new(
                        &paths,
                        default_price_unit,
                    )?),
                    users: Arc::new(JsonFileUserRepository::new(&paths)?),
                })
            }
        }
    }
}
