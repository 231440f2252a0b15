//! JSON file backed repositories.
//!
//! Directory structure:
//! ```text
//! data_dir/
//! ├── professions.json
//! └── users.json
//! ```
//!
//! Each call loads the collection, works on it and, for writes, saves it back
//! under a file lock. No state is cached between calls.

use crate::collection::{ProfessionCollection, UserCollection};
use crate::paths::ProdirPaths;
use crate::storage::AtomicJsonFile;
use async_trait::async_trait;
use prodir_core::error::{ProdirError, Result};
use prodir_core::profession::{
    NewProfession, Profession, ProfessionRepository, ServiceNameQuery,
};
use prodir_core::user::{User, UserId, UserRepository};
use tokio::sync::Mutex;
use tokio::task;

/// Profession repository persisted to `professions.json`.
///
/// File access runs in `tokio::task::spawn_blocking`, including the wait
/// for the cross-process lock.
pub struct JsonFileProfessionRepository {
    file: AtomicJsonFile<ProfessionCollection>,
    /// Serializes writers within this process; the file lock covers other processes.
    write_guard: Mutex<()>,
    default_price_unit: String,
}

impl JsonFileProfessionRepository {
    pub fn new(paths: &ProdirPaths, default_price_unit: impl Into<String>) -> Result<Self> {
        let path = paths.professions_file()?;
        tracing::debug!(
            "[JsonFileProfessionRepository] Using {}",
            path.display()
        );
        Ok(Self {
            file: AtomicJsonFile::new(path),
            write_guard: Mutex::new(()),
            default_price_unit: default_price_unit.into(),
        })
    }

    async fn load(&self) -> Result<ProfessionCollection> {
        let file = self.file.clone();
        run_blocking(move || file.load()).await.map_err(|e| {
            ProdirError::persistence(format!("Failed to load professions: {}", e.detail()))
        })
    }
}

/// Runs synchronous file work on the blocking pool.
async fn run_blocking<F, R>(work: F) -> Result<R>
where
    F: FnOnce() -> Result<R> + Send + 'static,
    R: Send + 'static,
{
    task::spawn_blocking(work)
        .await
        .map_err(|e| ProdirError::io(format!("Failed to spawn blocking task: {}", e)))?
}

/// Keeps schema and not-found errors, wraps anything else as a persistence failure.
fn write_error(action: &str, err: ProdirError) -> ProdirError {
    if err.is_validation() || err.is_not_found() {
        err
    } else {
        ProdirError::persistence(format!("Failed to {}: {}", action, err.detail()))
    }
}

#[async_trait]
impl ProfessionRepository for JsonFileProfessionRepository {
    async fn create(&self, profession: NewProfession) -> Result<Profession> {
        let _guard = self.write_guard.lock().await;
        let file = self.file.clone();
        let default_price_unit = self.default_price_unit.clone();

        run_blocking(move || {
            file.update(|collection| collection.insert(profession, &default_price_unit))
        })
        .await
        .map_err(|e| write_error("save profession", e))
    }

    async fn find_by_owner(&self, user: &UserId) -> Result<Option<Profession>> {
        Ok(self.load().await?.find_by_owner(user))
    }

    async fn find_by_service_name(&self, query: &ServiceNameQuery) -> Result<Vec<Profession>> {
        Ok(self.load().await?.find_matching(query))
    }

    async fn save(&self, profession: &Profession) -> Result<Profession> {
        let _guard = self.write_guard.lock().await;
        let file = self.file.clone();
        let profession = profession.clone();

        run_blocking(move || file.update(|collection| collection.replace(&profession)))
            .await
            .map_err(|e| write_error("save profession", e))
    }

    async fn list_all(&self) -> Result<Vec<Profession>> {
        Ok(self.load().await?.all())
    }
}

/// User repository persisted to `users.json`.
pub struct JsonFileUserRepository {
    file: AtomicJsonFile<UserCollection>,
    write_guard: Mutex<()>,
}

impl JsonFileUserRepository {
    pub fn new(paths: &ProdirPaths) -> Result<Self> {
        Ok(Self {
            file: AtomicJsonFile::new(paths.users_file()?),
            write_guard: Mutex::new(()),
        })
    }
}

#[async_trait]
impl UserRepository for JsonFileUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>> {
        let file = self.file.clone();
        let users = run_blocking(move || file.load()).await.map_err(|e| {
            ProdirError::persistence(format!("Failed to load users: {}", e.detail()))
        })?;
        Ok(users.find(id))
    }

    async fn save(&self, user: &User) -> Result<()> {
        let _guard = self.write_guard.lock().await;
        let file = self.file.clone();
        let user = user.clone();

        run_blocking(move || {
            file.update(|users| {
                users.upsert(&user);
                Ok(())
            })
        })
        .await
        .map_err(|e| write_error("save user", e))
    }

    async fn set_profession_flag(&self, id: &UserId, is_profession: bool) -> Result<bool> {
        let _guard = self.write_guard.lock().await;
        let file = self.file.clone();
        let id = id.clone();

        run_blocking(move || file.update(|users| Ok(users.set_profession_flag(&id, is_profession))))
            .await
            .map_err(|e| write_error("update user flag", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prodir_core::profession::RawFields;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    fn candidate(owner: &str, service_name: &str) -> NewProfession {
        let raw: RawFields = match json!({
            "name": "Asha",
            "email": "asha@example.com",
            "mobileNo": "9000000000",
            "serviceCategory": "Home",
            "serviceName": service_name,
            "servicePrice": "250",
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        NewProfession::from_raw(UserId::new(owner), &raw).unwrap()
    }

    fn create_test_repositories() -> (JsonFileProfessionRepository, JsonFileUserRepository, TempDir)
    {
        let temp_dir = TempDir::new().unwrap();
        let paths = ProdirPaths::new(Some(temp_dir.path()));
        let professions = JsonFileProfessionRepository::new(&paths, "per-service").unwrap();
        let users = JsonFileUserRepository::new(&paths).unwrap();
        (professions, users, temp_dir)
    }

    #[tokio::test]
    async fn test_create_and_find_survive_reopen() {
        let (repo, _, temp_dir) = create_test_repositories();
        let created = repo.create(candidate("u1", "Electrician")).await.unwrap();

        let reopened =
            JsonFileProfessionRepository::new(&ProdirPaths::new(Some(temp_dir.path())), "x")
                .unwrap();
        let found = reopened
            .find_by_owner(&UserId::new("u1"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found, created);
        assert_eq!(found.service_price, Some(250.0));
        assert!(temp_dir.path().join("professions.json").exists());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_parallel_creates_from_separate_handles_all_persist() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ProdirPaths::new(Some(temp_dir.path()));
        let first = JsonFileProfessionRepository::new(&paths, "per-service").unwrap();
        let second = JsonFileProfessionRepository::new(&paths, "per-service").unwrap();

        let (a, b, c, d) = tokio::join!(
            first.create(candidate("u1", "Plumber")),
            second.create(candidate("u2", "Plumber")),
            first.create(candidate("u3", "Plumber")),
            second.create(candidate("u4", "Plumber")),
        );
        for result in [a, b, c, d] {
            result.unwrap();
        }

        assert_eq!(first.list_all().await.unwrap().len(), 4);
        assert!(temp_dir.path().join("professions.lock").exists());
    }

    #[tokio::test]
    async fn test_save_validation_error_is_kept() {
        let (repo, _, _temp_dir) = create_test_repositories();
        let mut profession = repo.create(candidate("u1", "Electrician")).await.unwrap();

        profession.service_price = Some(-3.0);
        let err = repo.save(&profession).await.unwrap_err();
        assert!(err.is_validation());

        let stored = repo.find_by_owner(&UserId::new("u1")).await.unwrap().unwrap();
        assert_eq!(stored.service_price, Some(250.0));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_persistence_error() {
        let (repo, _, temp_dir) = create_test_repositories();
        std::fs::write(temp_dir.path().join("professions.json"), "[oops").unwrap();

        let query = ServiceNameQuery::new(Some("plumber")).unwrap();
        let err = repo.find_by_service_name(&query).await.unwrap_err();
        assert!(matches!(err, ProdirError::Persistence(_)));
    }

    #[tokio::test]
    async fn test_user_flag_round_trip() {
        let (_, users, _temp_dir) = create_test_repositories();
        let id = UserId::new("u1");

        assert!(!users.set_profession_flag(&id, true).await.unwrap());

        users.save(&User::new(id.clone(), None)).await.unwrap();
        assert!(users.set_profession_flag(&id, true).await.unwrap());
        assert!(users.find_by_id(&id).await.unwrap().unwrap().is_profession);
    }
}
