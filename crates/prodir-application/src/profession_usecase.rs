//! Profession use case implementation.
//!
//! `ProfessionUseCase` is the operations engine for professional profiles:
//! create, directory lookup and partial update. Each operation takes the
//! caller identity explicitly, validates the raw payload against the entity
//! model and issues a single persistence call.

use crate::profession::ProfessionUpdater;
use prodir_core::error::{ProdirError, Result};
use prodir_core::profession::{
    NewProfession, Profession, ProfessionPatch, ProfessionRepository, RawFields,
    ServiceNameQuery,
};
use prodir_core::user::{UserId, UserRepository};
use std::sync::Arc;

/// Message for operations invoked without a resolved identity.
pub const NOT_AUTHENTICATED: &str = "User not authenticated to add profession.";

/// Use case for managing profession profiles.
///
/// # Responsibilities
///
/// - Creating a profile owned by the caller and flagging the user as a professional
/// - Looking profiles up by exact service name
/// - Merging sparse updates into the caller's existing profile
///
/// # Consistency
///
/// The user flag written after a successful create is best-effort: if it
/// fails, the profile still exists and the failure is only logged.
/// `ProfessionFlagReconciler` repairs such users after the fact.
pub struct ProfessionUseCase {
    /// Repository for profession persistence
    profession_repository: Arc<dyn ProfessionRepository>,
    /// Repository holding the `isProfession` flag
    user_repository: Arc<dyn UserRepository>,
    /// Read-modify-write helper for updates
    updater: ProfessionUpdater,
}

impl ProfessionUseCase {
    /// Creates a new `ProfessionUseCase` instance.
    pub fn new(
        profession_repository: Arc<dyn ProfessionRepository>,
        user_repository: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            updater: ProfessionUpdater::new(profession_repository.clone()),
            profession_repository,
            user_repository,
        }
    }

    /// Creates a profile owned by `caller`.
    ///
    /// Owner keys inside `raw` are ignored. A blank or unparseable
    /// `servicePrice` is dropped; an omitted `priceUnit` gets the store default.
    ///
    /// # Errors
    ///
    /// - `Unauthenticated` when `caller` is `None` (nothing is written)
    /// - `Validation` with every offending field
    /// - `Persistence` for any other store failure
    pub async fn create(&self, caller: Option<&UserId>, raw: &RawFields) -> Result<Profession> {
        let owner = require_caller(caller)?;
        tracing::debug!("[ProfessionUseCase] create() called for owner: {}", owner);

        let candidate = NewProfession::from_raw(owner.clone(), raw)?;

        let profession = self
            .profession_repository
            .create(candidate)
            .await
            .map_err(|e| {
                tracing::error!("[ProfessionUseCase] Error while saving profession: {}", e);
                into_operation_error(e)
            })?;

        tracing::info!(
            "[ProfessionUseCase] Created profession: id={}, owner={}",
            profession.id,
            owner
        );

        self.flag_owner(owner).await;

        Ok(profession)
    }

    /// Returns every profile whose service name equals `service_name`, ignoring case.
    ///
    /// # Errors
    ///
    /// - `InvalidQuery` when `service_name` is absent or blank
    /// - `Persistence` when the read fails
    pub async fn find_by_service_name(&self, service_name: Option<&str>) -> Result<Vec<Profession>> {
        let query = ServiceNameQuery::new(service_name)?;
        tracing::debug!(
            "[ProfessionUseCase] find_by_service_name() called: {:?}",
            query.service_name()
        );

        let professions = self
            .profession_repository
            .find_by_service_name(&query)
            .await
            .map_err(|e| {
                tracing::error!("[ProfessionUseCase] Error while fetching professionals: {}", e);
                ProdirError::persistence(e.detail())
            })?;

        tracing::debug!(
            "[ProfessionUseCase] Found {} profession(s) for {:?}",
            professions.len(),
            query.service_name()
        );

        Ok(professions)
    }

    /// Merges `raw` into the profile owned by `caller`.
    ///
    /// Keys missing from `raw` are left untouched; keys present overwrite,
    /// even with empty or null values. See [`ProfessionPatch::apply_to`].
    ///
    /// # Errors
    ///
    /// - `Unauthenticated` when `caller` is `None`
    /// - `NotFound` when the caller owns no profile (nothing is written, the
    ///   payload is not inspected)
    /// - `Validation` for uncastable values or a merged result that breaks the schema
    /// - `Persistence` when the read or write fails
    pub async fn update_own_profile(
        &self,
        caller: Option<&UserId>,
        raw: &RawFields,
    ) -> Result<Profession> {
        let owner = require_caller(caller)?;
        tracing::debug!(
            "[ProfessionUseCase] update_own_profile() called for owner: {}",
            owner
        );

        // Cast after the lookup: no profile means NotFound, whatever the payload.
        let profession = self
            .updater
            .update(owner, |profession| {
                ProfessionPatch::from_raw(raw)?.apply_to(profession);
                Ok(())
            })
            .await
            .map_err(|e| {
                if e.is_persistence() {
                    tracing::error!("[ProfessionUseCase] Error updating professional profile: {}", e);
                }
                into_operation_error(e)
            })?;

        tracing::info!(
            "[ProfessionUseCase] Updated profession: id={}, owner={}",
            profession.id,
            owner
        );

        Ok(profession)
    }

    /// Marks `owner` as a professional. Failures are logged, never returned.
    async fn flag_owner(&self, owner: &UserId) {
        match self.user_repository.set_profession_flag(owner, true).await {
            Ok(true) => {
                tracing::debug!("[ProfessionUseCase] Flagged user {} as professional", owner);
            }
            Ok(false) => {
                tracing::warn!(
                    "[ProfessionUseCase] User {} not found while setting isProfession; profile kept",
                    owner
                );
            }
            Err(e) => {
                tracing::warn!(
                    "[ProfessionUseCase] Failed to set isProfession for user {}: {}; profile kept",
                    owner,
                    e
                );
            }
        }
    }
}

fn require_caller(caller: Option<&UserId>) -> Result<&UserId> {
    caller
        .filter(|id| !id.as_str().trim().is_empty())
        .ok_or_else(|| ProdirError::unauthenticated(NOT_AUTHENTICATED))
}

/// Keeps the caller-facing classes and folds everything else into `Persistence`.
fn into_operation_error(err: ProdirError) -> ProdirError {
    match err {
        ProdirError::Validation { .. } | ProdirError::NotFound { .. } => err,
        other => ProdirError::persistence(other.detail()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prodir_core::profession::{DEFAULT_PRICE_UNIT, ProfessionSchema};
    use prodir_core::user::User;
    use serde_json::{Value, json};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // Mock ProfessionRepository for testing
    #[derive(Default)]
    struct MockProfessionRepository {
        professions: Mutex<Vec<Profession>>,
        saves: AtomicUsize,
        fail_reads: bool,
    }

    #[async_trait::async_trait]
    impl ProfessionRepository for MockProfessionRepository {
        async fn create(&self, profession: NewProfession) -> Result<Profession> {
            let mut professions = self.professions.lock().unwrap();
            let id = format!("p{}", professions.len() + 1);
            let stored = profession.into_profession(id, DEFAULT_PRICE_UNIT, "t0".into());
            ProfessionSchema::validate(&stored)?;
            professions.push(stored.clone());
            Ok(stored)
        }

        async fn find_by_owner(&self, user: &UserId) -> Result<Option<Profession>> {
            if self.fail_reads {
                return Err(ProdirError::io("connection reset"));
            }
            let professions = self.professions.lock().unwrap();
            Ok(professions.iter().find(|p| p.is_owned_by(user)).cloned())
        }

        async fn find_by_service_name(
            &self,
            query: &ServiceNameQuery,
        ) -> Result<Vec<Profession>> {
            if self.fail_reads {
                return Err(ProdirError::io("connection reset"));
            }
            let professions = self.professions.lock().unwrap();
            Ok(professions
                .iter()
                .filter(|p| query.matches(&p.service_name))
                .cloned()
                .collect())
        }

        async fn save(&self, profession: &Profession) -> Result<Profession> {
            ProfessionSchema::validate(profession)?;
            self.saves.fetch_add(1, Ordering::SeqCst);
            let mut professions = self.professions.lock().unwrap();
            let slot = professions
                .iter_mut()
                .find(|p| p.id == profession.id)
                .ok_or_else(|| ProdirError::not_found("Profession", &profession.id))?;
            *slot = profession.clone();
            Ok(profession.clone())
        }

        async fn list_all(&self) -> Result<Vec<Profession>> {
            Ok(self.professions.lock().unwrap().clone())
        }
    }

    // Mock UserRepository for testing
    #[derive(Default)]
    struct MockUserRepository {
        users: Mutex<Vec<User>>,
        fail_writes: bool,
    }

    #[async_trait::async_trait]
    impl UserRepository for MockUserRepository {
        async fn find_by_id(&self, id: &UserId) -> Result<Option<User>> {
            let users = self.users.lock().unwrap();
            Ok(users.iter().find(|u| &u.id == id).cloned())
        }

        async fn save(&self, user: &User) -> Result<()> {
            self.users.lock().unwrap().push(user.clone());
            Ok(())
        }

        async fn set_profession_flag(&self, id: &UserId, is_profession: bool) -> Result<bool> {
            if self.fail_writes {
                return Err(ProdirError::persistence("user store unavailable"));
            }
            let mut users = self.users.lock().unwrap();
            match users.iter_mut().find(|u| &u.id == id) {
                Some(user) => {
                    user.is_profession = is_profession;
                    Ok(true)
                }
                None => Ok(false),
            }
        }
    }

    fn raw(value: Value) -> RawFields {
        match value {
            Value::Object(map) => map,
            _ => panic!("test payload must be an object"),
        }
    }

    fn payload() -> RawFields {
        raw(json!({
            "name": "Asha Patil",
            "email": "asha@example.com",
            "mobileNo": "9000000000",
            "serviceCategory": "Home Services",
            "serviceName": "Plumber",
            "servicePrice": "100",
        }))
    }

    fn use_case(
        professions: MockProfessionRepository,
        users: MockUserRepository,
    ) -> (
        ProfessionUseCase,
        Arc<MockProfessionRepository>,
        Arc<MockUserRepository>,
    ) {
        let professions = Arc::new(professions);
        let users = Arc::new(users);
        let use_case = ProfessionUseCase::new(professions.clone(), users.clone());
        (use_case, professions, users)
    }

    fn user(id: &str) -> User {
        User::new(UserId::new(id), None)
    }

    #[tokio::test]
    async fn test_create_requires_caller() {
        let (use_case, professions, _) =
            use_case(MockProfessionRepository::default(), MockUserRepository::default());

        let err = use_case.create(None, &payload()).await.unwrap_err();
        assert!(err.is_unauthenticated());
        assert_eq!(err.status_code(), 401);
        assert!(professions.professions.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_sets_owner_and_flag() {
        let users = MockUserRepository::default();
        users.users.lock().unwrap().push(user("u1"));
        let (use_case, _, users) = use_case(MockProfessionRepository::default(), users);

        let mut fields = payload();
        fields.insert("user".into(), json!("someone-else"));
        let caller = UserId::new("u1");

        let profession = use_case.create(Some(&caller), &fields).await.unwrap();
        assert_eq!(profession.user, caller);
        assert_eq!(profession.service_price, Some(100.0));

        let flagged = users.find_by_id(&caller).await.unwrap().unwrap();
        assert!(flagged.is_profession);
    }

    #[tokio::test]
    async fn test_create_survives_flag_failure() {
        let users = MockUserRepository {
            fail_writes: true,
            ..Default::default()
        };
        let (use_case, professions, _) = use_case(MockProfessionRepository::default(), users);

        let caller = UserId::new("u1");
        let profession = use_case.create(Some(&caller), &payload()).await.unwrap();

        assert_eq!(profession.user, caller);
        assert_eq!(professions.professions.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_validation_is_aggregated() {
        let (use_case, professions, _) =
            use_case(MockProfessionRepository::default(), MockUserRepository::default());

        let err = use_case
            .create(Some(&UserId::new("u1")), &raw(json!({ "name": "Asha" })))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "email is required, mobileNo is required, serviceCategory is required, serviceName is required"
        );
        assert!(professions.professions.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_rejects_blank_query() {
        let (use_case, _, _) =
            use_case(MockProfessionRepository::default(), MockUserRepository::default());

        assert!(use_case.find_by_service_name(None).await.unwrap_err().is_invalid_query());
        assert!(use_case.find_by_service_name(Some("")).await.unwrap_err().is_invalid_query());
    }

    #[tokio::test]
    async fn test_find_read_failure_is_persistence_error() {
        let repository = MockProfessionRepository {
            fail_reads: true,
            ..Default::default()
        };
        let (use_case, _, _) = use_case(repository, MockUserRepository::default());

        let err = use_case.find_by_service_name(Some("plumber")).await.unwrap_err();
        assert!(matches!(err, ProdirError::Persistence(ref m) if m.contains("connection reset")));
    }

    #[tokio::test]
    async fn test_update_without_profile_is_not_found() {
        let (use_case, professions, _) =
            use_case(MockProfessionRepository::default(), MockUserRepository::default());

        let err = use_case
            .update_own_profile(Some(&UserId::new("u1")), &raw(json!({ "city": "Pune" })))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(professions.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_update_without_profile_ignores_bad_payload() {
        let (use_case, professions, _) =
            use_case(MockProfessionRepository::default(), MockUserRepository::default());

        let err = use_case
            .update_own_profile(Some(&UserId::new("u1")), &raw(json!({ "needSupport": {} })))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.status_code(), 404);
        assert_eq!(professions.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_update_cast_error_with_profile_is_validation() {
        let (use_case, professions, _) =
            use_case(MockProfessionRepository::default(), MockUserRepository::default());
        let caller = UserId::new("u1");
        use_case.create(Some(&caller), &payload()).await.unwrap();

        let err = use_case
            .update_own_profile(Some(&caller), &raw(json!({ "needSupport": {} })))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "needSupport must be a boolean");
        assert_eq!(professions.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_update_merges_present_keys_only() {
        let (use_case, _, _) =
            use_case(MockProfessionRepository::default(), MockUserRepository::default());
        let caller = UserId::new("u1");
        let before = use_case.create(Some(&caller), &payload()).await.unwrap();

        let after = use_case
            .update_own_profile(Some(&caller), &raw(json!({ "city": "Pune", "user": "u2" })))
            .await
            .unwrap();

        assert_eq!(after.city.as_deref(), Some("Pune"));
        assert_eq!(after.user, caller);
        assert_eq!(after.name, before.name);
        assert_eq!(after.service_price, before.service_price);
    }

    #[tokio::test]
    async fn test_update_blanking_required_field_fails_validation() {
        let (use_case, professions, _) =
            use_case(MockProfessionRepository::default(), MockUserRepository::default());
        let caller = UserId::new("u1");
        use_case.create(Some(&caller), &payload()).await.unwrap();

        let err = use_case
            .update_own_profile(Some(&caller), &raw(json!({ "name": "" })))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "name is required");
        assert_eq!(professions.professions.lock().unwrap()[0].name, "Asha Patil");
    }

    #[tokio::test]
    async fn test_update_read_failure_is_persistence_error() {
        let repository = MockProfessionRepository {
            fail_reads: true,
            ..Default::default()
        };
        let (use_case, _, _) = use_case(repository, MockUserRepository::default());

        let err = use_case
            .update_own_profile(Some(&UserId::new("u1")), &raw(json!({ "city": "Pune" })))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 500);
    }
}
