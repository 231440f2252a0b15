//! User repository trait.

use super::model::{User, UserId};
use crate::error::Result;

/// An abstract repository for the user records this service reads and flags.
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(User))`: User found
    /// - `Ok(None)`: No such user
    /// - `Err(_)`: Error occurred during retrieval
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>>;

    /// Inserts or replaces a user record.
    async fn save(&self, user: &User) -> Result<()>;

    /// Sets the `isProfession` flag of a user.
    ///
    /// # Returns
    ///
    /// - `Ok(true)`: The flag was written
    /// - `Ok(false)`: No such user; nothing was written
    /// - `Err(_)`: Error occurred during the write
    async fn set_profession_flag(&self, id: &UserId, is_profession: bool) -> Result<bool>;
}
