//! Repair of the `isProfession` user flag.
//!
//! Creating a profile and flagging its owner are two independent writes, and
//! the second one may fail. The reconciler walks every profile and sets the
//! flag on owners that are missing it.

use prodir_core::error::Result;
use prodir_core::profession::ProfessionRepository;
use prodir_core::user::{UserId, UserRepository};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Outcome of a reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileReport {
    /// Distinct profile owners examined
    pub checked_owners: usize,
    /// Owners whose flag was set by this pass
    pub repaired: Vec<UserId>,
    /// Owners with a profile but no user record
    pub missing_users: Vec<UserId>,
    /// Owners whose flag could not be read or written
    pub failed: Vec<(UserId, String)>,
}

impl ReconcileReport {
    /// True when nothing needed repair and nothing failed.
    pub fn is_consistent(&self) -> bool {
        self.repaired.is_empty() && self.missing_users.is_empty() && self.failed.is_empty()
    }
}

/// Sets `isProfession` on every profile owner that lacks it.
///
/// Only ever raises the flag; users without a profile are not touched.
pub struct ProfessionFlagReconciler {
    profession_repository: Arc<dyn ProfessionRepository>,
    user_repository: Arc<dyn UserRepository>,
}

impl ProfessionFlagReconciler {
    pub fn new(
        profession_repository: Arc<dyn ProfessionRepository>,
        user_repository: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            profession_repository,
            user_repository,
        }
    }

    /// Runs one pass.
    ///
    /// Fails only if the profiles cannot be listed; per-owner failures are
    /// recorded in the report and the pass continues.
    pub async fn reconcile(&self) -> Result<ReconcileReport> {
        let owners: BTreeSet<UserId> = self
            .profession_repository
            .list_all()
            .await?
            .into_iter()
            .map(|profession| profession.user)
            .collect();

        let mut report = ReconcileReport {
            checked_owners: owners.len(),
            ..Default::default()
        };

        for owner in owners {
            match self.user_repository.find_by_id(&owner).await {
                Ok(Some(user)) if user.is_profession => {}
                Ok(Some(_)) => match self.user_repository.set_profession_flag(&owner, true).await {
                    Ok(true) => report.repaired.push(owner),
                    Ok(false) => report.missing_users.push(owner),
                    Err(e) => report.failed.push((owner, e.to_string())),
                },
                Ok(None) => report.missing_users.push(owner),
                Err(e) => report.failed.push((owner, e.to_string())),
            }
        }

        if report.is_consistent() {
            tracing::debug!(
                "[ProfessionFlagReconciler] {} owner(s) checked, all consistent",
                report.checked_owners
            );
        } else {
            tracing::info!(
                "[ProfessionFlagReconciler] checked={}, repaired={}, missing_users={}, failed={}",
                report.checked_owners,
                report.repaired.len(),
                report.missing_users.len(),
                report.failed.len()
            );
        }

        Ok(report)
    }
}
