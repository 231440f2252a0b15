//! Process-local repositories.
//!
//! Used by tests and by `backend = "memory"`. Contents are lost on exit.

use crate::collection::{ProfessionCollection, UserCollection};
use async_trait::async_trait;
use prodir_core::error::Result;
use prodir_core::profession::{
    DEFAULT_PRICE_UNIT, NewProfession, Profession, ProfessionRepository, ServiceNameQuery,
};
use prodir_core::user::{User, UserId, UserRepository};
use tokio::sync::RwLock;

/// In-memory profession repository.
pub struct MemoryProfessionRepository {
    collection: RwLock<ProfessionCollection>,
    default_price_unit: String,
}

impl MemoryProfessionRepository {
    pub fn new(default_price_unit: impl Into<String>) -> Self {
        Self {
            collection: RwLock::new(ProfessionCollection::default()),
            default_price_unit: default_price_unit.into(),
        }
    }

    /// Revision counter of a stored document.
    pub async fn revision_of(&self, id: &str) -> Option<u64> {
        self.collection.read().await.revision_of(id)
    }
}

impl Default for MemoryProfessionRepository {
    fn default() -> Self {
        Self::new(DEFAULT_PRICE_UNIT)
    }
}

#[async_trait]
impl ProfessionRepository for MemoryProfessionRepository {
    async fn create(&self, profession: NewProfession) -> Result<Profession> {
        let mut collection = self.collection.write().await;
        collection.insert(profession, &self.default_price_unit)
    }

    async fn find_by_owner(&self, user: &UserId) -> Result<Option<Profession>> {
        Ok(self.collection.read().await.find_by_owner(user))
    }

    async fn find_by_service_name(&self, query: &ServiceNameQuery) -> Result<Vec<Profession>> {
        Ok(self.collection.read().await.find_matching(query))
    }

    async fn save(&self, profession: &Profession) -> Result<Profession> {
        self.collection.write().await.replace(profession)
    }

    async fn list_all(&self) -> Result<Vec<Profession>> {
        Ok(self.collection.read().await.all())
    }
}

/// In-memory user repository.
#[derive(Default)]
pub struct MemoryUserRepository {
    collection: RwLock<UserCollection>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>> {
        Ok(self.collection.read().await.find(id))
    }

    async fn save(&self, user: &User) -> Result<()> {
        self.collection.write().await.upsert(user);
        Ok(())
    }

    async fn set_profession_flag(&self, id: &UserId, is_profession: bool) -> Result<bool> {
        Ok(self
            .collection
            .write()
            .await
            .set_profession_flag(id, is_profession))
    }
}
