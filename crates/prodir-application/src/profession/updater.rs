//! Profession updater helper for the read-modify-write pattern.
//!
//! `ProfessionUpdater` abstracts the "find by owner → update → save" sequence
//! behind the partial-update operation.

use prodir_core::error::{ProdirError, Result};
use prodir_core::profession::{Profession, ProfessionRepository};
use prodir_core::user::UserId;
use std::sync::Arc;

/// Helper struct for updating the profile owned by a user.
///
/// `ProfessionUpdater` encapsulates:
/// 1. Loading the owner's first profile from storage
/// 2. Applying updates to that snapshot
/// 3. Saving the whole document back
///
/// Nothing is locked between steps 1 and 3. Two updates that load the same
/// snapshot both save, and the later save wins.
pub struct ProfessionUpdater {
    repository: Arc<dyn ProfessionRepository>,
}

impl ProfessionUpdater {
    /// Creates a new `ProfessionUpdater` with the given repository.
    pub fn new(repository: Arc<dyn ProfessionRepository>) -> Self {
        Self { repository }
    }

    /// Updates the profile owned by `owner` by applying the given function.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The owner has no profile (`NotFound`, nothing is written)
    /// - The updater function returns an error
    /// - Saving to storage fails, including schema violations
    pub async fn update<F>(&self, owner: &UserId, updater: F) -> Result<Profession>
    where
        F: FnOnce(&mut Profession) -> Result<()>,
    {
        tracing::debug!("[ProfessionUpdater] update() called for owner: {}", owner);

        let mut profession = self
            .repository
            .find_by_owner(owner)
            .await?
            .ok_or_else(|| ProdirError::not_found("Profession", owner.as_str()))?;

        tracing::debug!(
            "[ProfessionUpdater] Loaded profession: id={}, service_name={}",
            profession.id,
            profession.service_name
        );

        updater(&mut profession)?;

        tracing::debug!("[ProfessionUpdater] Saving profession: id={}", profession.id);
        let saved = self.repository.save(&profession).await?;

        tracing::debug!(
            "[ProfessionUpdater] Profession saved successfully: id={}",
            saved.id
        );

        Ok(saved)
    }
}
