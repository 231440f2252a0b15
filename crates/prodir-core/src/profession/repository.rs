//! Profession repository trait.
//!
//! Defines the interface for profession persistence operations.

use super::model::Profession;
use super::query::ServiceNameQuery;
use super::request::NewProfession;
use crate::error::Result;
use crate::user::UserId;

/// An abstract repository for managing profession persistence.
///
/// This trait defines the contract the operations engine relies on,
/// decoupling it from the specific storage mechanism.
///
/// # Implementation Notes
///
/// Implementations must:
/// - Run [`super::ProfessionSchema`] before every write and report violations
///   as `ProdirError::Validation`, distinct from I/O failures
/// - Apply the configured `priceUnit` default when a new record omits it
/// - Keep internal versioning metadata out of the returned records
#[async_trait::async_trait]
pub trait ProfessionRepository: Send + Sync {
    /// Persists a new profile.
    ///
    /// # Returns
    ///
    /// - `Ok(Profession)`: The stored record, with its assigned id and timestamps
    /// - `Err(ProdirError::Validation)`: The candidate violates the schema
    /// - `Err(_)`: Any other storage failure
    async fn create(&self, profession: NewProfession) -> Result<Profession>;

    /// Finds the first profile owned by `user`, in store order.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Profession))`: Profile found
    /// - `Ok(None)`: The user owns no profile
    /// - `Err(_)`: Error occurred during retrieval
    async fn find_by_owner(&self, user: &UserId) -> Result<Option<Profession>>;

    /// Returns every profile whose service name matches `query`, in store order.
    async fn find_by_service_name(&self, query: &ServiceNameQuery) -> Result<Vec<Profession>>;

    /// Replaces the stored document with `profession` (matched by id).
    ///
    /// The whole document is written; concurrent writers are not detected and
    /// the last save wins.
    ///
    /// # Returns
    ///
    /// - `Ok(Profession)`: The record as stored, with `updated_at` refreshed
    /// - `Err(ProdirError::Validation)`: The record violates the schema
    /// - `Err(ProdirError::NotFound)`: No record has this id
    async fn save(&self, profession: &Profession) -> Result<Profession>;

    /// Lists all stored profiles.
    async fn list_all(&self) -> Result<Vec<Profession>>;
}
