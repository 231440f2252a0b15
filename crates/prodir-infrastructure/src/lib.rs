pub mod bootstrap;
pub mod collection;
pub mod config_service;
pub mod json_file_repository;
pub mod memory_repository;
pub mod paths;
pub mod storage;

pub use crate::bootstrap::Repositories;
pub use crate::config_service::ConfigService;
pub use crate::json_file_repository::{JsonFileProfessionRepository, JsonFileUserRepository};
pub use crate::memory_repository::{MemoryProfessionRepository, MemoryUserRepository};
